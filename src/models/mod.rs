//! Timetabling domain models.
//!
//! Provides the core data types for stating a timetabling problem and
//! representing its solution. All inputs are plain values supplied by the
//! calling application; the engine reads them once per solve and returns
//! plain values back.
//!
//! # Time Representation
//!
//! Dates are `chrono::NaiveDate`. Times within a day are integer offsets
//! in a single caller-chosen unit (typically minutes-of-day or
//! hours-of-day). Every input — session duration, day window, availability
//! intervals — must use the same unit; the consumer defines what one unit
//! means.

mod calendar;
mod course;
mod teacher;
mod timetable;

pub use calendar::{CalendarDay, DayType, TimeSlot};
pub use course::Course;
pub use teacher::Teacher;
pub use timetable::{ScheduledSession, Timetable};
