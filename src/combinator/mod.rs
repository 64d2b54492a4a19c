//! The Scheduling Combinator.
//!
//! Orchestrates one solve: expand courses into sessions, build the slot
//! grid, apply the four constraint families, search, and decode the
//! satisfying assignment into a [`Timetable`].
//!
//! Each [`Combinator::solve`] call is a pure function of its inputs
//! (modulo solver tie-breaking): no state survives between calls, and
//! independent instances may solve concurrently. There is no objective —
//! the first assignment satisfying every constraint is the answer, and
//! callers must not rely on which one that is.
//!
//! A failed solve yields nothing usable. Whether to relax the inputs
//! (more rooms, wider windows, less volume) and try again is the
//! caller's decision.

mod constraints;
mod grid;
mod sessions;

pub use grid::SlotGrid;
pub use sessions::{expand_sessions, Session};

use crate::error::{Result, ScheduleError};
use crate::models::{CalendarDay, Course, ScheduledSession, TimeSlot, Timetable};
use crate::solver::{self, CpModel, Solution, SolveStatus, SolverConfig};
use crate::validation::validate_input;

/// Parameters of a solve, shared by every course.
#[derive(Debug, Clone)]
pub struct CombinatorConfig {
    /// Length of every session, in the problem's time unit.
    pub session_duration: i64,
    /// Daily working window sessions must fit inside.
    pub day_window: TimeSlot,
    /// Ceiling on simultaneously running sessions.
    pub room_count: u32,
    /// Search tuning knobs.
    pub solver: SolverConfig,
}

impl CombinatorConfig {
    /// Creates a configuration with default solver settings.
    pub fn new(session_duration: i64, day_window: TimeSlot, room_count: u32) -> Self {
        Self {
            session_duration,
            day_window,
            room_count,
            solver: SolverConfig::default(),
        }
    }

    /// Replaces the solver settings.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// One-shot timetable solver over a calendar and a set of courses.
#[derive(Debug)]
pub struct Combinator {
    calendar: Vec<CalendarDay>,
    courses: Vec<Course>,
    config: CombinatorConfig,
}

impl Combinator {
    /// Creates a combinator over the given inputs.
    pub fn new(calendar: Vec<CalendarDay>, courses: Vec<Course>, config: CombinatorConfig) -> Self {
        Self {
            calendar,
            courses,
            config,
        }
    }

    /// Runs one solve: validate → expand → constrain → search → decode.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidConfiguration`] if the inputs fail
    ///   validation; the model is never built.
    /// - [`ScheduleError::Infeasible`] if no assignment satisfies every
    ///   constraint.
    /// - [`ScheduleError::TimedOut`] if the search budget ran out before
    ///   a solution or a proof.
    pub fn solve(&self) -> Result<Timetable> {
        validate_input(
            &self.calendar,
            &self.courses,
            self.config.session_duration,
            self.config.day_window,
            self.config.room_count,
        )
        .map_err(ScheduleError::InvalidConfiguration)?;

        let duration = self.config.session_duration;
        let sessions = expand_sessions(&self.courses, duration);

        let mut model = CpModel::new();
        let grid = SlotGrid::build(
            &mut model,
            &self.calendar,
            sessions.len(),
            self.config.day_window,
        );
        log::debug!(
            "slot grid: {} sessions x {} days x {} offsets = {} variables",
            sessions.len(),
            grid.day_count(),
            self.config.day_window.duration(),
            model.var_count()
        );

        constraints::apply_slot_exclusivity(&mut model, &grid, duration);
        constraints::apply_availability(&mut model, &grid, &self.courses, &sessions, duration);
        constraints::apply_teacher_exclusivity(&mut model, &grid, &self.courses, &sessions, duration);
        constraints::apply_room_capacity(&mut model, &grid, duration, self.config.room_count);
        log::debug!("model constrained: {} constraints", model.constraint_count());

        let outcome = solver::solve(&model, &self.config.solver);
        log::info!(
            "solve finished: {} in {:?}",
            outcome.status,
            outcome.stats.elapsed
        );

        match outcome.status {
            SolveStatus::Feasible(solution) => Ok(self.decode(&grid, &sessions, &solution)),
            SolveStatus::Infeasible => Err(ScheduleError::Infeasible),
            SolveStatus::TimedOut => Err(ScheduleError::TimedOut(outcome.stats.elapsed)),
        }
    }

    /// Reads back, for each session, the single true variable and emits
    /// the concrete placement. Output order follows session order.
    fn decode(&self, grid: &SlotGrid, sessions: &[Session], solution: &Solution) -> Timetable {
        let duration = self.config.session_duration;
        let mut timetable = Timetable::new();

        for (index, session) in sessions.iter().enumerate() {
            let course = &self.courses[session.course];
            'placed: for day in 0..grid.day_count() {
                for offset in grid.offsets() {
                    if offset + duration > grid.window().end {
                        continue;
                    }
                    if solution.value(grid.var(index, day, offset)) {
                        timetable.push(ScheduledSession {
                            course_id: course.id,
                            course_name: course.name.clone(),
                            day: grid.date(day),
                            start: offset,
                            end: offset + duration,
                            teacher_name: course.teacher.name.clone(),
                        });
                        break 'placed;
                    }
                }
            }
        }

        timetable
    }
}
