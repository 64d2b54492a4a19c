//! Timetable quality metrics.
//!
//! Read-only indicators computed from a produced timetable. The solver
//! never optimizes these — they exist so the calling application can
//! report on a schedule it accepted.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Load per teacher | Sum of session durations per teacher |
//! | Busiest day | Date with the most sessions |
//! | Peak concurrency | Most sessions running at one time unit |
//! | Days used | Distinct dates carrying at least one session |

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::Timetable;

/// Indicators computed from a timetable.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Total scheduled sessions.
    pub total_sessions: usize,
    /// Instruction time per teacher, in the problem's time unit.
    pub load_by_teacher: HashMap<String, i64>,
    /// Date with the most sessions, with its count. Earliest date wins
    /// ties. `None` for an empty timetable.
    pub busiest_day: Option<(NaiveDate, usize)>,
    /// Most sessions running simultaneously at any time unit — the
    /// number of rooms the timetable actually needs.
    pub peak_concurrency: usize,
    /// Distinct dates carrying at least one session.
    pub days_used: usize,
}

impl TimetableKpi {
    /// Computes indicators from a timetable.
    pub fn calculate(timetable: &Timetable) -> Self {
        let mut load_by_teacher: HashMap<String, i64> = HashMap::new();
        let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

        for session in &timetable.sessions {
            *load_by_teacher
                .entry(session.teacher_name.clone())
                .or_insert(0) += session.duration();
            *by_day.entry(session.day).or_insert(0) += 1;
        }

        let mut busiest_day: Option<(NaiveDate, usize)> = None;
        for (&day, &count) in &by_day {
            if busiest_day.map_or(true, |(_, best)| count > best) {
                busiest_day = Some((day, count));
            }
        }

        let peak_concurrency = by_day
            .keys()
            .map(|&day| peak_on(timetable, day))
            .max()
            .unwrap_or(0);

        Self {
            total_sessions: timetable.session_count(),
            load_by_teacher,
            busiest_day,
            peak_concurrency,
            days_used: by_day.len(),
        }
    }
}

/// Peak number of simultaneously running sessions on one date, via an
/// event sweep. Ends sort before starts at the same unit: the intervals
/// are half-open, so a session ending at `t` frees its room for one
/// starting at `t`.
fn peak_on(timetable: &Timetable, day: NaiveDate) -> usize {
    let mut events: Vec<(i64, i32)> = Vec::new();
    for session in timetable.sessions_on(day) {
        events.push((session.start, 1));
        events.push((session.end, -1));
    }
    events.sort_by_key(|&(time, delta)| (time, delta));

    let mut running: i32 = 0;
    let mut peak: i32 = 0;
    for (_, delta) in events {
        running += delta;
        peak = peak.max(running);
    }
    peak as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduledSession;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn session(teacher: &str, day: NaiveDate, start: i64, end: i64) -> ScheduledSession {
        ScheduledSession {
            course_id: 1,
            course_name: "C1".into(),
            day,
            start,
            end,
            teacher_name: teacher.into(),
        }
    }

    fn sample() -> Timetable {
        let mut t = Timetable::new();
        t.push(session("Ada", date(10), 8, 10));
        t.push(session("Ada", date(10), 10, 12));
        t.push(session("Alan", date(10), 9, 11));
        t.push(session("Alan", date(11), 8, 10));
        t
    }

    #[test]
    fn test_loads_and_days() {
        let kpi = TimetableKpi::calculate(&sample());
        assert_eq!(kpi.total_sessions, 4);
        assert_eq!(kpi.load_by_teacher["Ada"], 4);
        assert_eq!(kpi.load_by_teacher["Alan"], 4);
        assert_eq!(kpi.days_used, 2);
        assert_eq!(kpi.busiest_day, Some((date(10), 3)));
    }

    #[test]
    fn test_peak_concurrency_counts_overlap() {
        // Ada 8-10 and Alan 9-11 overlap during 9-10.
        let kpi = TimetableKpi::calculate(&sample());
        assert_eq!(kpi.peak_concurrency, 2);
    }

    #[test]
    fn test_back_to_back_not_concurrent() {
        let mut t = Timetable::new();
        t.push(session("Ada", date(10), 8, 10));
        t.push(session("Alan", date(10), 10, 12));
        let kpi = TimetableKpi::calculate(&t);
        assert_eq!(kpi.peak_concurrency, 1);
    }

    #[test]
    fn test_busiest_day_tie_prefers_earliest() {
        let mut t = Timetable::new();
        t.push(session("Ada", date(11), 8, 10));
        t.push(session("Ada", date(10), 8, 10));
        let kpi = TimetableKpi::calculate(&t);
        assert_eq!(kpi.busiest_day, Some((date(10), 1)));
    }

    #[test]
    fn test_empty_timetable() {
        let kpi = TimetableKpi::calculate(&Timetable::new());
        assert_eq!(kpi.total_sessions, 0);
        assert_eq!(kpi.peak_concurrency, 0);
        assert_eq!(kpi.busiest_day, None);
        assert_eq!(kpi.days_used, 0);
    }
}
