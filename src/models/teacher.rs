//! Teacher model with per-date availability.
//!
//! Availability maps each calendar date to the time slots during which the
//! teacher may be scheduled. The map is read-only input to the solver; it
//! is typically derived from recurring or one-off slot records by the
//! calling application. Intervals on a date are expected sorted and
//! disjoint — [`crate::validation`] rejects inputs that are not.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A teacher and the time slots they can be scheduled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// External identifier.
    pub id: i64,
    /// Display name, carried into scheduled sessions.
    pub name: String,
    /// Availability slots per date, sorted and disjoint within a date.
    pub availability: BTreeMap<NaiveDate, Vec<TimeSlot>>,
}

impl Teacher {
    /// Creates a teacher with no availability.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            availability: BTreeMap::new(),
        }
    }

    /// Adds an availability slot on a date.
    pub fn with_slot(mut self, date: NaiveDate, start: i64, end: i64) -> Self {
        self.availability
            .entry(date)
            .or_default()
            .push(TimeSlot::new(start, end));
        self
    }

    /// Availability slots on a date (empty if none declared).
    pub fn slots_on(&self, date: NaiveDate) -> &[TimeSlot] {
        self.availability
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a session of `duration` starting at `start` on `date` lies
    /// entirely within one of this teacher's availability slots.
    pub fn can_host(&self, date: NaiveDate, start: i64, duration: i64) -> bool {
        self.slots_on(date)
            .iter()
            .any(|slot| slot.covers(start, start + duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_teacher_builder() {
        let t = Teacher::new(7, "Ada")
            .with_slot(date(10), 8, 12)
            .with_slot(date(10), 14, 18)
            .with_slot(date(11), 8, 10);

        assert_eq!(t.id, 7);
        assert_eq!(t.name, "Ada");
        assert_eq!(t.slots_on(date(10)).len(), 2);
        assert_eq!(t.slots_on(date(11)).len(), 1);
        assert!(t.slots_on(date(12)).is_empty());
    }

    #[test]
    fn test_can_host_containment() {
        let t = Teacher::new(1, "Ada").with_slot(date(10), 8, 12);

        assert!(t.can_host(date(10), 8, 4)); // exactly fills the slot
        assert!(t.can_host(date(10), 9, 2));
        assert!(!t.can_host(date(10), 10, 4)); // runs past the slot end
        assert!(!t.can_host(date(10), 7, 2)); // starts before the slot
        assert!(!t.can_host(date(11), 8, 2)); // no slots that day
    }

    #[test]
    fn test_can_host_second_slot() {
        let t = Teacher::new(1, "Ada")
            .with_slot(date(10), 8, 10)
            .with_slot(date(10), 14, 18);

        assert!(t.can_host(date(10), 15, 2));
        // Straddling the gap between slots is not containment.
        assert!(!t.can_host(date(10), 9, 6));
    }

    #[test]
    fn test_availability_serde() {
        let t = Teacher::new(1, "Ada").with_slot(date(10), 8, 12);
        let json = serde_json::to_string(&t).unwrap();
        let back: Teacher = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slots_on(date(10)), t.slots_on(date(10)));
    }
}
