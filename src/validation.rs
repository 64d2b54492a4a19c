//! Input validation for timetabling problems.
//!
//! Checks structural integrity of the calendar, courses, and solver
//! parameters before model construction. Detects:
//! - Non-positive volumes and durations
//! - Malformed day windows and zero room counts
//! - Duplicate course IDs and empty course lists
//! - Inverted, unsorted, or overlapping availability intervals
//! - Calendar days out of date order
//!
//! Every problem found is reported; nothing is silently corrected. A
//! solve call with any validation error fails fast with
//! [`InvalidConfiguration`](crate::error::ScheduleError::InvalidConfiguration)
//! and never reaches the solver.

use std::collections::HashSet;
use std::fmt;

use crate::models::{CalendarDay, Course, TimeSlot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A course requires zero or negative instruction time.
    NonPositiveVolume,
    /// A course ends before it starts.
    InvalidDateRange,
    /// Two courses share the same ID.
    DuplicateCourseId,
    /// There is nothing to schedule.
    EmptyCourseList,
    /// The session duration is zero or negative.
    NonPositiveSessionDuration,
    /// The daily working window is inverted or starts before offset zero.
    MalformedDayWindow,
    /// The daily working window cannot fit a single session.
    WindowTooNarrow,
    /// No rooms are available.
    NoRooms,
    /// An availability interval is inverted or starts before offset zero.
    MalformedAvailability,
    /// Availability intervals on one date are unsorted or overlap.
    OverlappingAvailability,
    /// Calendar days are not in strictly increasing date order.
    UnorderedCalendar,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Validates the inputs of a timetabling problem.
///
/// Checks:
/// 1. Session duration is positive
/// 2. The day window is well-formed and fits at least one session
/// 3. At least one room exists
/// 4. The course list is non-empty, with unique IDs
/// 5. Every course has positive volume and `start_date <= end_date`
/// 6. Every availability interval is well-formed, sorted, and disjoint
/// 7. Calendar days are in strictly increasing date order
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    calendar: &[CalendarDay],
    courses: &[Course],
    session_duration: i64,
    day_window: TimeSlot,
    room_count: u32,
) -> ValidationResult {
    let mut errors = Vec::new();

    if session_duration <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveSessionDuration,
            format!("Session duration must be positive, got {session_duration}"),
        ));
    }

    if day_window.start < 0 || day_window.end <= day_window.start {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedDayWindow,
            format!(
                "Day window [{}, {}) is not a valid interval",
                day_window.start, day_window.end
            ),
        ));
    } else if session_duration > 0 && day_window.duration() < session_duration {
        errors.push(ValidationError::new(
            ValidationErrorKind::WindowTooNarrow,
            format!(
                "Day window [{}, {}) cannot fit a session of duration {session_duration}",
                day_window.start, day_window.end
            ),
        ));
    }

    if room_count == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoRooms,
            "Room count must be positive",
        ));
    }

    if courses.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCourseList,
            "No courses to schedule",
        ));
    }

    let mut course_ids = HashSet::new();
    for course in courses {
        if !course_ids.insert(course.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourseId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }

        if course.volume <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveVolume,
                format!(
                    "Course '{}' has non-positive volume {}",
                    course.name, course.volume
                ),
            ));
        }

        if course.start_date > course.end_date {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDateRange,
                format!(
                    "Course '{}' ends ({}) before it starts ({})",
                    course.name, course.end_date, course.start_date
                ),
            ));
        }

        validate_availability(course, &mut errors);
    }

    for pair in calendar.windows(2) {
        if pair[0].date >= pair[1].date {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnorderedCalendar,
                format!(
                    "Calendar dates out of order: {} then {}",
                    pair[0].date, pair[1].date
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a teacher's availability map: every interval well-formed, and
/// intervals on one date sorted and disjoint.
fn validate_availability(course: &Course, errors: &mut Vec<ValidationError>) {
    let teacher = &course.teacher;
    for (date, slots) in &teacher.availability {
        for slot in slots {
            if slot.start < 0 || slot.end <= slot.start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedAvailability,
                    format!(
                        "Teacher '{}' has malformed interval [{}, {}) on {date}",
                        teacher.name, slot.start, slot.end
                    ),
                ));
            }
        }

        for pair in slots.windows(2) {
            if pair[1].start < pair[0].end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OverlappingAvailability,
                    format!(
                        "Teacher '{}' has unsorted or overlapping intervals on {date}",
                        teacher.name
                    ),
                ));
            }
        }
    }
}
