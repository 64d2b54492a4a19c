//! Slot grid: the decision-variable space.
//!
//! One boolean variable per (session, eligible-day, start-offset) triple,
//! laid out densely in row-major order. Eligible days are the
//! teaching-typed subsequence of the calendar in date order — the day
//! index used everywhere downstream is the position within that
//! subsequence, not the absolute calendar index, which is what confines
//! scheduling to teaching days.
//!
//! Offsets cover the whole day window with no feasibility filtering;
//! infeasible combinations are pruned by constraints, not here. The grid
//! is therefore `O(sessions × days × width)` variables — callers bound
//! the window width and horizon to keep models tractable.

use chrono::NaiveDate;

use crate::models::{CalendarDay, TimeSlot};
use crate::solver::{CpModel, VarId};

/// Dense variable grid over (session, eligible day, start offset).
#[derive(Debug)]
pub struct SlotGrid {
    dates: Vec<NaiveDate>,
    window: TimeSlot,
    num_sessions: usize,
    vars: Vec<VarId>,
}

impl SlotGrid {
    /// Filters the calendar down to teaching days and registers one
    /// variable per (session, day, offset) against the model.
    pub fn build(
        model: &mut CpModel,
        calendar: &[CalendarDay],
        num_sessions: usize,
        window: TimeSlot,
    ) -> Self {
        let dates: Vec<NaiveDate> = calendar
            .iter()
            .filter(|day| day.is_teaching_day())
            .map(|day| day.date)
            .collect();

        let width = window.duration() as usize;
        let mut vars = Vec::with_capacity(num_sessions * dates.len() * width);
        for _ in 0..num_sessions * dates.len() * width {
            vars.push(model.new_bool_var());
        }

        Self {
            dates,
            window,
            num_sessions,
            vars,
        }
    }

    /// Number of eligible (teaching) days.
    pub fn day_count(&self) -> usize {
        self.dates.len()
    }

    /// Number of sessions the grid was built for.
    pub fn session_count(&self) -> usize {
        self.num_sessions
    }

    /// Calendar date of an eligible-day index.
    pub fn date(&self, day: usize) -> NaiveDate {
        self.dates[day]
    }

    /// The daily working window.
    pub fn window(&self) -> TimeSlot {
        self.window
    }

    /// Every start offset in the day window.
    pub fn offsets(&self) -> std::ops::Range<i64> {
        self.window.start..self.window.end
    }

    /// The variable bound to (session, day, offset).
    pub fn var(&self, session: usize, day: usize, offset: i64) -> VarId {
        debug_assert!(session < self.num_sessions);
        debug_assert!(day < self.dates.len());
        debug_assert!(self.window.contains(offset));
        let width = self.window.duration() as usize;
        let column = (offset - self.window.start) as usize;
        self.vars[(session * self.dates.len() + day) * width + column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayType;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn calendar() -> Vec<CalendarDay> {
        vec![
            CalendarDay::new(1, date(10), DayType::Course),
            CalendarDay::new(2, date(11), DayType::Exam),
            CalendarDay::new(3, date(12), DayType::Course),
            CalendarDay::new(4, date(13), DayType::Other),
        ]
    }

    #[test]
    fn test_grid_dimensions() {
        let mut model = CpModel::new();
        let grid = SlotGrid::build(&mut model, &calendar(), 3, TimeSlot::new(8, 20));

        assert_eq!(grid.day_count(), 2); // exam and other days filtered out
        assert_eq!(grid.session_count(), 3);
        assert_eq!(model.var_count(), 3 * 2 * 12);
    }

    #[test]
    fn test_eligible_dates_in_order() {
        let mut model = CpModel::new();
        let grid = SlotGrid::build(&mut model, &calendar(), 1, TimeSlot::new(8, 20));

        assert_eq!(grid.date(0), date(10));
        assert_eq!(grid.date(1), date(12));
    }

    #[test]
    fn test_vars_distinct() {
        let mut model = CpModel::new();
        let grid = SlotGrid::build(&mut model, &calendar(), 2, TimeSlot::new(8, 12));

        let mut seen = std::collections::HashSet::new();
        for session in 0..2 {
            for day in 0..grid.day_count() {
                for offset in grid.offsets() {
                    assert!(seen.insert(grid.var(session, day, offset)));
                }
            }
        }
        assert_eq!(seen.len(), model.var_count());
    }

    #[test]
    fn test_offsets_span_window() {
        let mut model = CpModel::new();
        let grid = SlotGrid::build(&mut model, &calendar(), 1, TimeSlot::new(9, 17));
        let offsets: Vec<i64> = grid.offsets().collect();
        assert_eq!(offsets.first(), Some(&9));
        assert_eq!(offsets.last(), Some(&16));
    }
}
