//! Calendar days and time slots.
//!
//! The scheduling horizon is an ordered list of [`CalendarDay`] records.
//! Only days typed [`DayType::Course`] are eligible to host sessions; exam
//! and other days are carried for completeness but never scheduled on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classification of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Teaching day — eligible for session placement.
    Course,
    /// Examination day — never scheduled on.
    Exam,
    /// Holiday, administrative day, etc. — never scheduled on.
    Other,
}

/// One day of the scheduling horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    /// External identifier.
    pub id: i64,
    /// Calendar date.
    pub date: NaiveDate,
    /// Day classification.
    pub day_type: DayType,
}

impl CalendarDay {
    /// Creates a new calendar day.
    pub fn new(id: i64, date: NaiveDate, day_type: DayType) -> Self {
        Self { id, date, day_type }
    }

    /// Whether sessions may be placed on this day.
    #[inline]
    pub fn is_teaching_day(&self) -> bool {
        self.day_type == DayType::Course
    }
}

/// A time interval [start, end) within a day.
///
/// Half-open: includes start, excludes end. Units are whatever the caller
/// adopted for the whole problem (see the module docs in [`crate::models`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Interval start (inclusive).
    pub start: i64,
    /// Interval end (exclusive).
    pub end: i64,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Length of this slot.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether a time offset falls within this slot.
    #[inline]
    pub fn contains(&self, time: i64) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether the range [start, end) lies entirely inside this slot.
    #[inline]
    pub fn covers(&self, start: i64, end: i64) -> bool {
        start >= self.start && end <= self.end
    }

    /// Whether two slots overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
