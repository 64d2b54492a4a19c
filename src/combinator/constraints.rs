//! The four hard-constraint families.
//!
//! Applied in a fixed order (slot exclusivity, availability, teacher
//! exclusivity, room capacity). Order affects search effort, not
//! correctness. The first two families prune by fixing variables to
//! false; the last two add cardinality bounds over overlap sets.
//!
//! Overlap is checked point-in-time: a variable for start offset `o`
//! covers every time unit in `[o, o + duration)`, so two sessions with
//! different offsets that share any unit exclude each other.

use std::collections::BTreeMap;

use crate::models::Course;
use crate::solver::{CpModel, VarId};

use super::grid::SlotGrid;
use super::sessions::Session;

/// Family 1: each session occupies exactly one slot.
///
/// Offsets whose session would run past the window end are fixed to
/// false — the variables still exist, they just can never be chosen —
/// and excluded from the exactly-one sum.
pub(crate) fn apply_slot_exclusivity(model: &mut CpModel, grid: &SlotGrid, duration: i64) {
    for session in 0..grid.session_count() {
        let mut choices = Vec::new();
        for day in 0..grid.day_count() {
            for offset in grid.offsets() {
                let var = grid.var(session, day, offset);
                if offset + duration > grid.window().end {
                    model.fix_false(var);
                } else {
                    choices.push(var);
                }
            }
        }
        model.add_exactly_one(choices);
    }
}

/// Family 2: a session may only start where its teacher's availability
/// contains the whole `[offset, offset + duration)` range on that date.
/// Everything else is fixed to false — partial containment never counts.
pub(crate) fn apply_availability(
    model: &mut CpModel,
    grid: &SlotGrid,
    courses: &[Course],
    sessions: &[Session],
    duration: i64,
) {
    for (index, session) in sessions.iter().enumerate() {
        let teacher = &courses[session.course].teacher;
        for day in 0..grid.day_count() {
            let date = grid.date(day);
            for offset in grid.offsets() {
                if offset + duration > grid.window().end {
                    continue; // already fixed by family 1
                }
                if !teacher.can_host(date, offset, duration) {
                    model.fix_false(grid.var(index, day, offset));
                }
            }
        }
    }
}

/// Family 3: no teacher delivers two sessions at the same time unit.
pub(crate) fn apply_teacher_exclusivity(
    model: &mut CpModel,
    grid: &SlotGrid,
    courses: &[Course],
    sessions: &[Session],
    duration: i64,
) {
    let mut by_teacher: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (index, session) in sessions.iter().enumerate() {
        by_teacher
            .entry(courses[session.course].teacher.id)
            .or_default()
            .push(index);
    }

    for members in by_teacher.values() {
        if members.len() < 2 {
            continue;
        }
        for day in 0..grid.day_count() {
            for unit in grid.offsets() {
                let mut active = Vec::new();
                for &session in members {
                    push_covering_vars(&mut active, grid, session, day, unit, duration);
                }
                model.add_at_most(active, 1);
            }
        }
    }
}

/// Family 4: across all courses and teachers, at most `room_count`
/// sessions may be running at any time unit.
pub(crate) fn apply_room_capacity(
    model: &mut CpModel,
    grid: &SlotGrid,
    duration: i64,
    room_count: u32,
) {
    if grid.session_count() as u32 <= room_count {
        return; // fewer sessions than rooms: cannot be violated
    }
    for day in 0..grid.day_count() {
        for unit in grid.offsets() {
            let mut active = Vec::new();
            for session in 0..grid.session_count() {
                push_covering_vars(&mut active, grid, session, day, unit, duration);
            }
            model.add_at_most(active, room_count);
        }
    }
}

/// Collects the variables of `session` on `day` whose
/// `[offset, offset + duration)` range covers time unit `unit`.
fn push_covering_vars(
    out: &mut Vec<VarId>,
    grid: &SlotGrid,
    session: usize,
    day: usize,
    unit: i64,
    duration: i64,
) {
    let window = grid.window();
    let lo = (unit - duration + 1).max(window.start);
    let hi = unit.min(window.end - duration);
    for offset in lo..=hi {
        out.push(grid.var(session, day, offset));
    }
}
