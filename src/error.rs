//! Error types for timetable solving.

use std::time::Duration;

use thiserror::Error;

use crate::validation::ValidationError;

/// Terminal failure modes of a solve call.
///
/// `Infeasible` and `TimedOut` are distinct on purpose: the former says
/// no timetable can exist for these inputs, the latter says the search
/// budget ran out before either a timetable or a proof was found.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Inputs failed structural validation; the model was never built.
    #[error("invalid input: {} validation error(s)", .0.len())]
    InvalidConfiguration(Vec<ValidationError>),

    /// The search proved that no assignment satisfies every constraint.
    #[error("no feasible timetable exists for the given inputs")]
    Infeasible,

    /// The search budget was exhausted without a feasibility proof.
    /// Carries the wall-clock time actually spent.
    #[error("search stopped after {0:?} without a feasibility proof")]
    TimedOut(Duration),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

impl ScheduleError {
    /// The validation errors behind an `InvalidConfiguration`, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidConfiguration(errors) => errors,
            _ => &[],
        }
    }
}
