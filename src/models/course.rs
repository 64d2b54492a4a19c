//! Course model.
//!
//! A course is one teacher-subject-class assignment requiring scheduling:
//! a total instruction volume to be delivered as fixed-duration sessions
//! between two dates, by one teacher.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Teacher;

/// A teacher-subject-class assignment to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// External identifier.
    pub id: i64,
    /// Display name, carried into scheduled sessions.
    pub name: String,
    /// Total instruction time required, in the problem's time unit.
    /// Must be positive.
    pub volume: i64,
    /// First date of the course. Must not be after `end_date`.
    pub start_date: NaiveDate,
    /// Last date of the course.
    pub end_date: NaiveDate,
    /// The teacher delivering this course, with resolved availability.
    pub teacher: Teacher,
}

impl Course {
    /// Creates a new course.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        volume: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        teacher: Teacher,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            volume,
            start_date,
            end_date,
            teacher,
        }
    }

    /// Number of sessions needed to deliver the full volume:
    /// `ceil(volume / session_duration)`. A partial remainder still takes
    /// a whole session.
    pub fn session_count(&self, session_duration: i64) -> i64 {
        debug_assert!(session_duration > 0);
        (self.volume + session_duration - 1) / session_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn course(volume: i64) -> Course {
        Course::new(
            1,
            "Algorithms",
            volume,
            date(10),
            date(28),
            Teacher::new(1, "Ada"),
        )
    }

    #[test]
    fn test_session_count_exact_divisor() {
        assert_eq!(course(240).session_count(240), 1);
        assert_eq!(course(480).session_count(240), 2);
    }

    #[test]
    fn test_session_count_remainder() {
        assert_eq!(course(241).session_count(240), 2);
        assert_eq!(course(30).session_count(240), 1);
        assert_eq!(course(500).session_count(240), 3);
    }

    #[test]
    fn test_course_fields() {
        let c = course(240);
        assert_eq!(c.id, 1);
        assert_eq!(c.name, "Algorithms");
        assert_eq!(c.teacher.name, "Ada");
        assert!(c.start_date <= c.end_date);
    }
}
