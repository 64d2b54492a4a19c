//! Session expansion.
//!
//! Converts each course's total instruction volume into an integer number
//! of atomic sessions of fixed duration. Sessions have no independent
//! identity before solving — until a slot is assigned they exist only as
//! decision variables.

use crate::models::Course;

/// One atomic teaching unit awaiting placement, identified by the
/// position of its course in the input list and its ordinal within the
/// course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Index of the owning course in the input course list.
    pub course: usize,
    /// Ordinal of this session within its course, `0..session_count`.
    pub index: usize,
}

/// Expands courses into sessions: `ceil(volume / session_duration)` per
/// course, course order preserved, session indices ascending.
///
/// Deterministic and side-effect free — identical inputs always produce
/// the identical ordered list. Callers must have validated that
/// `session_duration` and every volume are positive.
pub fn expand_sessions(courses: &[Course], session_duration: i64) -> Vec<Session> {
    debug_assert!(session_duration > 0);
    let mut sessions = Vec::new();
    for (course_index, course) in courses.iter().enumerate() {
        let count = course.session_count(session_duration);
        debug_assert!(count > 0);
        for index in 0..count as usize {
            sessions.push(Session {
                course: course_index,
                index,
            });
        }
    }
    sessions
}
