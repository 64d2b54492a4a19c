//! Complete depth-first search with unit propagation.
//!
//! # Algorithm
//!
//! 1. Fix root-level assignments (variables fixed to false) and propagate
//!    every constraint to a fixpoint.
//! 2. Branch on an unassigned variable from the tightest unsatisfied
//!    `exactly-one` constraint, trying true first.
//! 3. On conflict, backtrack chronologically: undo the trail, flip the
//!    most recent untried decision to false, resume.
//! 4. When every `exactly-one` constraint holds, remaining free variables
//!    are false and the assignment is a solution.
//!
//! Exhausting the tree without a solution is a proof of infeasibility.
//! The wall clock is read periodically (step-counter mask, not every
//! decision) against the configured budget; exceeding it — or the
//! decision limit — aborts with [`SolveStatus::TimedOut`], which is a
//! distinct outcome from a proof.
//!
//! # Propagation rules
//!
//! - `exactly-one`: more than one true → conflict; one true → rest false;
//!   none true and none unassigned → conflict; none true and one
//!   unassigned → it becomes true.
//! - `at-most-k`: more than `k` true → conflict; `k` true → rest false.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::{ConstraintKind, CpModel, VarId};

/// Check the wall clock every 1024 decisions.
const CLOCK_CHECK_MASK: u64 = 0x3FF;

/// Tuning knobs for a solve. All knobs are opaque to correctness: they
/// bound how long the search runs and in what order it branches, never
/// which assignments count as solutions.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Wall-clock budget. `None` disables the time check entirely.
    pub time_limit: Option<Duration>,
    /// Maximum number of branching decisions. `None` = unbounded.
    pub decision_limit: Option<u64>,
    /// Seed for randomized branching order. `None` = deterministic
    /// first-candidate branching.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Some(Duration::from_secs(30)),
            decision_limit: None,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Creates the default configuration (30 s budget, no decision
    /// limit, deterministic branching).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Removes the wall-clock budget.
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit = None;
        self
    }

    /// Sets the decision limit.
    pub fn with_decision_limit(mut self, limit: u64) -> Self {
        self.decision_limit = Some(limit);
        self
    }

    /// Sets the branching seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A satisfying assignment.
#[derive(Debug, Clone)]
pub struct Solution {
    values: Vec<bool>,
}

impl Solution {
    /// Value of a variable in this solution.
    #[inline]
    pub fn value(&self, var: VarId) -> bool {
        self.values[var.index()]
    }
}

/// Terminal state of a search.
#[derive(Debug, Clone)]
pub enum SolveStatus {
    /// A satisfying assignment was found.
    Feasible(Solution),
    /// The search tree was exhausted: no satisfying assignment exists.
    Infeasible,
    /// A budget (time or decisions) ran out before either a solution or
    /// a proof.
    TimedOut,
}

impl SolveStatus {
    /// Whether a solution was found.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// The solution, if one was found.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Feasible(solution) => Some(solution),
            _ => None,
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Feasible(_) => write!(f, "Feasible"),
            Self::Infeasible => write!(f, "Infeasible"),
            Self::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// Search effort counters.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Branching decisions taken.
    pub decisions: u64,
    /// Assignments forced by propagation.
    pub propagations: u64,
    /// Dead ends encountered.
    pub conflicts: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Status plus effort counters for one solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Terminal state.
    pub status: SolveStatus,
    /// Effort counters.
    pub stats: SearchStats,
}

/// Solves a model to one of the three terminal states.
pub fn solve(model: &CpModel, config: &SolverConfig) -> SolveOutcome {
    let start = Instant::now();
    let mut search = Search::new(model, config);
    let status = search.run(config, start);

    let stats = SearchStats {
        decisions: search.decisions,
        propagations: search.propagations,
        conflicts: search.conflicts,
        elapsed: start.elapsed(),
    };

    log::debug!(
        "search finished: {status} ({} decisions, {} propagations, {} conflicts, {:?})",
        stats.decisions,
        stats.propagations,
        stats.conflicts,
        stats.elapsed
    );

    SolveOutcome { status, stats }
}

/// One branching decision, with enough context to undo and flip it.
struct DecisionFrame {
    var: u32,
    trail_mark: usize,
    flipped: bool,
}

struct Search<'a> {
    model: &'a CpModel,
    /// Per-variable assignment; `None` = unassigned.
    assignment: Vec<Option<bool>>,
    /// Per-constraint count of members currently true.
    true_count: Vec<u32>,
    /// Per-constraint count of members currently unassigned.
    unassigned_count: Vec<u32>,
    /// Variable → indices of constraints it appears in.
    occurrences: Vec<Vec<u32>>,
    /// Assigned variables in assignment order, for backtracking.
    trail: Vec<u32>,
    /// Constraints awaiting (re-)examination.
    queue: Vec<u32>,
    rng: Option<StdRng>,
    decisions: u64,
    propagations: u64,
    conflicts: u64,
}

impl<'a> Search<'a> {
    fn new(model: &'a CpModel, config: &SolverConfig) -> Self {
        let num_vars = model.var_count();
        let num_constraints = model.constraint_count();

        let mut occurrences = vec![Vec::new(); num_vars];
        let mut unassigned_count = vec![0u32; num_constraints];
        for (ci, constraint) in model.constraints().iter().enumerate() {
            unassigned_count[ci] = constraint.vars.len() as u32;
            for &var in &constraint.vars {
                occurrences[var.index()].push(ci as u32);
            }
        }

        Self {
            model,
            assignment: vec![None; num_vars],
            true_count: vec![0; num_constraints],
            unassigned_count,
            occurrences,
            trail: Vec::new(),
            queue: Vec::new(),
            rng: config.seed.map(StdRng::seed_from_u64),
            decisions: 0,
            propagations: 0,
            conflicts: 0,
        }
    }

    fn run(&mut self, config: &SolverConfig, start: Instant) -> SolveStatus {
        // Root level: apply construction-time fixings, then examine every
        // constraint once.
        for index in 0..self.model.var_count() {
            let var = index as u32;
            if self.model.is_fixed_false(VarId(var)) {
                self.assign(var, false);
            }
        }
        for ci in 0..self.model.constraint_count() {
            self.queue.push(ci as u32);
        }

        let mut decision_stack: Vec<DecisionFrame> = Vec::new();

        loop {
            if !self.propagate() {
                self.conflicts += 1;
                if !self.backtrack(&mut decision_stack) {
                    return SolveStatus::Infeasible;
                }
                continue;
            }

            if let Some(limit) = config.decision_limit {
                if self.decisions >= limit {
                    return SolveStatus::TimedOut;
                }
            }
            if (self.decisions & CLOCK_CHECK_MASK) == 0 {
                if let Some(limit) = config.time_limit {
                    if start.elapsed() >= limit {
                        return SolveStatus::TimedOut;
                    }
                }
            }

            match self.pick_branch_var() {
                None => {
                    // Every exactly-one constraint is satisfied; variables
                    // never forced either way stay false.
                    let values = self
                        .assignment
                        .iter()
                        .map(|value| value.unwrap_or(false))
                        .collect();
                    return SolveStatus::Feasible(Solution { values });
                }
                Some(var) => {
                    self.decisions += 1;
                    decision_stack.push(DecisionFrame {
                        var,
                        trail_mark: self.trail.len(),
                        flipped: false,
                    });
                    self.assign(var, true);
                }
            }
        }
    }

    /// Undoes decisions until one can be flipped to its false branch.
    /// Returns false when the stack is exhausted (infeasibility proven).
    fn backtrack(&mut self, decision_stack: &mut Vec<DecisionFrame>) -> bool {
        while let Some(frame) = decision_stack.pop() {
            self.undo_to(frame.trail_mark);
            if !frame.flipped {
                let var = frame.var;
                decision_stack.push(DecisionFrame {
                    var,
                    trail_mark: frame.trail_mark,
                    flipped: true,
                });
                self.assign(var, false);
                return true;
            }
        }
        false
    }

    /// Assigns an unassigned variable and schedules its constraints for
    /// re-examination.
    fn assign(&mut self, var: u32, value: bool) {
        debug_assert!(self.assignment[var as usize].is_none());
        self.assignment[var as usize] = Some(value);
        self.trail.push(var);
        for &ci in &self.occurrences[var as usize] {
            self.unassigned_count[ci as usize] -= 1;
            if value {
                self.true_count[ci as usize] += 1;
            }
            self.queue.push(ci);
        }
    }

    /// Unwinds the trail to a previous length, restoring counts.
    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let var = self.trail.pop().unwrap();
            let value = self.assignment[var as usize].take().unwrap();
            for &ci in &self.occurrences[var as usize] {
                self.unassigned_count[ci as usize] += 1;
                if value {
                    self.true_count[ci as usize] -= 1;
                }
            }
        }
        self.queue.clear();
    }

    /// Runs propagation to a fixpoint. Returns false on conflict.
    fn propagate(&mut self) -> bool {
        let model = self.model;
        while let Some(ci) = self.queue.pop() {
            let constraint = &model.constraints()[ci as usize];
            let true_count = self.true_count[ci as usize];
            let unassigned = self.unassigned_count[ci as usize];

            match constraint.kind {
                ConstraintKind::ExactlyOne => {
                    if true_count > 1 {
                        return false;
                    }
                    if true_count == 1 {
                        if unassigned > 0 {
                            self.force_unassigned_false(ci);
                        }
                    } else if unassigned == 0 {
                        return false;
                    } else if unassigned == 1 {
                        for &var in &constraint.vars {
                            if self.assignment[var.index()].is_none() {
                                self.propagations += 1;
                                self.assign(var.index() as u32, true);
                                break;
                            }
                        }
                    }
                }
                ConstraintKind::AtMost(cap) => {
                    if true_count > cap {
                        return false;
                    }
                    if true_count == cap && unassigned > 0 {
                        self.force_unassigned_false(ci);
                    }
                }
            }
        }
        true
    }

    /// Forces every unassigned member of a constraint to false.
    fn force_unassigned_false(&mut self, ci: u32) {
        let model = self.model;
        let constraint = &model.constraints()[ci as usize];
        for &var in &constraint.vars {
            if self.assignment[var.index()].is_none() {
                self.propagations += 1;
                self.assign(var.index() as u32, false);
            }
        }
    }

    /// Chooses the next branching variable: an unassigned member of the
    /// unsatisfied exactly-one constraint with the fewest open choices.
    /// Returns `None` when every exactly-one constraint is satisfied.
    fn pick_branch_var(&mut self) -> Option<u32> {
        let mut best: Option<(u32, u32)> = None; // (unassigned, constraint index)
        for (ci, constraint) in self.model.constraints().iter().enumerate() {
            if constraint.kind != ConstraintKind::ExactlyOne {
                continue;
            }
            if self.true_count[ci] > 0 {
                continue;
            }
            let unassigned = self.unassigned_count[ci];
            debug_assert!(unassigned > 0);
            if best.map_or(true, |(u, _)| unassigned < u) {
                best = Some((unassigned, ci as u32));
            }
        }

        let (_, ci) = best?;
        let constraint = &self.model.constraints()[ci as usize];
        let candidates: Vec<u32> = constraint
            .vars
            .iter()
            .filter(|var| self.assignment[var.index()].is_none())
            .map(|var| var.index() as u32)
            .collect();

        match &mut self.rng {
            Some(rng) => {
                let pick = rng.random_range(0..candidates.len());
                Some(candidates[pick])
            }
            None => candidates.first().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SolverConfig {
        SolverConfig::new().with_time_limit(Duration::from_secs(5))
    }

    #[test]
    fn test_trivial_feasible() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        model.add_exactly_one(vec![a, b]);

        let outcome = solve(&model, &config());
        let solution = outcome.status.solution().expect("feasible");
        assert_ne!(solution.value(a), solution.value(b));
    }

    #[test]
    fn test_empty_model_feasible() {
        let model = CpModel::new();
        let outcome = solve(&model, &config());
        assert!(outcome.status.is_feasible());
    }

    #[test]
    fn test_empty_exactly_one_infeasible() {
        let mut model = CpModel::new();
        model.add_exactly_one(vec![]);
        let outcome = solve(&model, &config());
        assert!(matches!(outcome.status, SolveStatus::Infeasible));
    }

    #[test]
    fn test_fixed_false_excluded() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        model.add_exactly_one(vec![a, b]);
        model.fix_false(a);

        let outcome = solve(&model, &config());
        let solution = outcome.status.solution().expect("feasible");
        assert!(!solution.value(a));
        assert!(solution.value(b));
    }

    #[test]
    fn test_at_most_conflict_infeasible() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        model.add_exactly_one(vec![a]);
        model.add_exactly_one(vec![b]);
        model.add_at_most(vec![a, b], 1);

        let outcome = solve(&model, &config());
        assert!(matches!(outcome.status, SolveStatus::Infeasible));
    }

    #[test]
    fn test_at_most_prunes_choices() {
        // Two sessions competing for two slots with capacity one each:
        // a feasible assignment must spread them out.
        let mut model = CpModel::new();
        let a1 = model.new_bool_var();
        let a2 = model.new_bool_var();
        let b1 = model.new_bool_var();
        let b2 = model.new_bool_var();
        model.add_exactly_one(vec![a1, a2]);
        model.add_exactly_one(vec![b1, b2]);
        model.add_at_most(vec![a1, b1], 1);
        model.add_at_most(vec![a2, b2], 1);

        let outcome = solve(&model, &config());
        let solution = outcome.status.solution().expect("feasible");
        assert_ne!(solution.value(a1), solution.value(b1));
        assert_ne!(solution.value(a2), solution.value(b2));
    }

    #[test]
    fn test_backtracking_finds_forced_spread() {
        // Three sessions over three slots, pairwise capacity one: a
        // permutation is required and exists.
        let mut model = CpModel::new();
        let grid: Vec<Vec<VarId>> = (0..3)
            .map(|_| (0..3).map(|_| model.new_bool_var()).collect())
            .collect();
        for row in &grid {
            model.add_exactly_one(row.clone());
        }
        for slot in 0..3 {
            model.add_at_most(grid.iter().map(|row| row[slot]).collect(), 1);
        }

        let outcome = solve(&model, &config());
        let solution = outcome.status.solution().expect("feasible");
        for slot in 0..3 {
            let used = grid.iter().filter(|row| solution.value(row[slot])).count();
            assert_eq!(used, 1);
        }
    }

    #[test]
    fn test_zero_time_budget_times_out() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        model.add_exactly_one(vec![a, b]);

        let outcome = solve(&model, &SolverConfig::new().with_time_limit(Duration::ZERO));
        assert!(matches!(outcome.status, SolveStatus::TimedOut));
    }

    #[test]
    fn test_decision_limit_times_out() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        model.add_exactly_one(vec![a, b]);

        let outcome = solve(&model, &config().with_decision_limit(0));
        assert!(matches!(outcome.status, SolveStatus::TimedOut));
    }

    #[test]
    fn test_seeded_search_still_correct() {
        let mut model = CpModel::new();
        let vars: Vec<VarId> = (0..8).map(|_| model.new_bool_var()).collect();
        model.add_exactly_one(vars.clone());

        for seed in [0, 1, 42] {
            let outcome = solve(&model, &config().with_seed(seed));
            let solution = outcome.status.solution().expect("feasible");
            let trues = vars.iter().filter(|v| solution.value(**v)).count();
            assert_eq!(trues, 1);
        }
    }

    #[test]
    fn test_stats_populated() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        model.add_exactly_one(vec![a, b]);

        let outcome = solve(&model, &config());
        assert!(outcome.status.is_feasible());
        assert!(outcome.stats.decisions >= 1);
    }
}
