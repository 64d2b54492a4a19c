//! Timetable generation engine.
//!
//! Expands courses (teacher-subject-class assignments) into fixed-duration
//! sessions and binds each session to a (day, start-time) slot under hard
//! constraints: teacher availability, no teacher double-booking, and a
//! ceiling on simultaneously occupied rooms.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `CalendarDay`, `TimeSlot`, `Teacher`,
//!   `Course`, `ScheduledSession`, `Timetable`
//! - **`validation`**: Input integrity checks (volumes, windows, availability)
//! - **`solver`**: Boolean constraint model and complete backtracking search
//! - **`combinator`**: Session expansion, slot grid, constraint application,
//!   solve orchestration, and solution decoding
//! - **`kpi`**: Quality metrics over a produced timetable
//!
//! # Architecture
//!
//! A solve is a single invocation-scoped computation: build model → search →
//! decode → discard. The engine holds no state across calls; independent
//! solves may run concurrently in separate `Combinator` instances. This is a
//! satisfaction problem — any assignment meeting every constraint is
//! accepted, and no objective is optimized.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Rossi et al. (2006), "Handbook of Constraint Programming"

pub mod combinator;
pub mod error;
pub mod kpi;
pub mod models;
pub mod solver;
pub mod validation;
