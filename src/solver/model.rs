//! Boolean constraint model.
//!
//! Variables are dense handles; constraints are cardinality bounds over
//! variable sets. Variables may additionally be fixed to false at
//! construction time, which pruning-style constraints use heavily: a
//! fixed variable still exists (index math over a dense grid stays
//! simple) but can never be chosen.

/// Handle to a boolean decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) u32);

impl VarId {
    /// Dense index of this variable.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Cardinality bound applied to a constraint's variable set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Exactly one member variable must be true.
    ExactlyOne,
    /// At most `k` member variables may be true.
    AtMost(u32),
}

/// A cardinality constraint over a set of distinct variables.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Bound to enforce.
    pub kind: ConstraintKind,
    /// Member variables. Must be distinct.
    pub vars: Vec<VarId>,
}

/// A boolean satisfaction model under construction.
#[derive(Debug, Default)]
pub struct CpModel {
    fixed_false: Vec<bool>,
    constraints: Vec<Constraint>,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new boolean variable.
    pub fn new_bool_var(&mut self) -> VarId {
        let id = VarId(self.fixed_false.len() as u32);
        self.fixed_false.push(false);
        id
    }

    /// Permanently fixes a variable to false. Idempotent.
    pub fn fix_false(&mut self, var: VarId) {
        self.fixed_false[var.index()] = true;
    }

    /// Whether a variable has been fixed to false.
    #[inline]
    pub fn is_fixed_false(&self, var: VarId) -> bool {
        self.fixed_false[var.index()]
    }

    /// Requires exactly one of `vars` to be true.
    ///
    /// An empty set is accepted and makes the model unsatisfiable — a
    /// session with no admissible slot is exactly that.
    pub fn add_exactly_one(&mut self, vars: Vec<VarId>) {
        self.constraints.push(Constraint {
            kind: ConstraintKind::ExactlyOne,
            vars,
        });
    }

    /// Requires at most `cap` of `vars` to be true.
    ///
    /// Vacuous bounds (fewer members than the cap) are skipped — they
    /// cannot be violated.
    pub fn add_at_most(&mut self, vars: Vec<VarId>, cap: u32) {
        if vars.len() as u32 <= cap {
            return;
        }
        self.constraints.push(Constraint {
            kind: ConstraintKind::AtMost(cap),
            vars,
        });
    }

    /// Number of registered variables.
    pub fn var_count(&self) -> usize {
        self.fixed_false.len()
    }

    /// Number of registered constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_registration() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(model.var_count(), 2);
    }

    #[test]
    fn test_fix_false() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        assert!(!model.is_fixed_false(a));

        model.fix_false(a);
        model.fix_false(a); // idempotent
        assert!(model.is_fixed_false(a));
        assert!(!model.is_fixed_false(b));
    }

    #[test]
    fn test_vacuous_at_most_skipped() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();

        model.add_at_most(vec![a], 1); // single member, cap 1
        assert_eq!(model.constraint_count(), 0);

        model.add_at_most(vec![a, b], 1);
        assert_eq!(model.constraint_count(), 1);
    }

    #[test]
    fn test_exactly_one_always_recorded() {
        let mut model = CpModel::new();
        let a = model.new_bool_var();
        model.add_exactly_one(vec![a]);
        model.add_exactly_one(vec![]); // unsatisfiable, but recorded
        assert_eq!(model.constraint_count(), 2);
    }
}
