//! Timetable (solution) model.
//!
//! A timetable is a complete binding of every session to a calendar date
//! and start time. It is only produced for feasible solves: the number of
//! scheduled sessions always equals the total session count of the input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduled session: a concrete (date, start, end) placement of an
/// atomic teaching unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledSession {
    /// Owning course identifier.
    pub course_id: i64,
    /// Owning course name (denormalized for query convenience).
    pub course_name: String,
    /// Calendar date the session takes place on.
    pub day: NaiveDate,
    /// Start offset within the day.
    pub start: i64,
    /// End offset within the day (`start + session_duration`).
    pub end: i64,
    /// Name of the teacher delivering the session.
    pub teacher_name: String,
}

impl ScheduledSession {
    /// Session length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether this session occupies the given time offset on its day.
    #[inline]
    pub fn covers(&self, time: i64) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two sessions overlap in time on the same day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

/// A complete schedule: every session of every course, in stable order
/// (courses in input order, session indices ascending).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// Scheduled sessions.
    pub sessions: Vec<ScheduledSession>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scheduled session.
    pub fn push(&mut self, session: ScheduledSession) {
        self.sessions.push(session);
    }

    /// Number of scheduled sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are scheduled.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// All sessions of a given course.
    pub fn sessions_for_course(&self, course_id: i64) -> Vec<&ScheduledSession> {
        self.sessions
            .iter()
            .filter(|s| s.course_id == course_id)
            .collect()
    }

    /// All sessions delivered by a given teacher.
    pub fn sessions_for_teacher(&self, teacher_name: &str) -> Vec<&ScheduledSession> {
        self.sessions
            .iter()
            .filter(|s| s.teacher_name == teacher_name)
            .collect()
    }

    /// All sessions on a given date.
    pub fn sessions_on(&self, day: NaiveDate) -> Vec<&ScheduledSession> {
        self.sessions.iter().filter(|s| s.day == day).collect()
    }
}
