//! ---
//! so_section: "11-simulation"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Fixed-cadence timestamp windows for generated series."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use std::time::Duration;

use chrono::{Datelike, Days, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::SimError;

/// Half-open window `[start, start + duration)` sampled every `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    step: TimeDelta,
    steps: usize,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, duration: Duration, interval: Duration) -> Result<Self, SimError> {
        if interval.is_zero() {
            return Err(SimError::ZeroInterval);
        }
        if duration.is_zero() {
            return Err(SimError::ZeroDuration);
        }
        if duration.as_nanos() % interval.as_nanos() != 0 {
            return Err(SimError::UnevenWindow { duration, interval });
        }
        let out_of_range = || SimError::OutOfRange(start.to_string());
        let step = TimeDelta::from_std(interval).map_err(|_| out_of_range())?;
        let span = TimeDelta::from_std(duration).map_err(|_| out_of_range())?;
        start.checked_add_signed(span).ok_or_else(out_of_range)?;
        let steps = usize::try_from(duration.as_nanos() / interval.as_nanos())
            .map_err(|_| out_of_range())?;
        Ok(Self { start, step, steps })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Timestamp of the final sample (not the exclusive window end).
    pub fn last(&self) -> NaiveDateTime {
        self.timestamps().last().unwrap_or(self.start)
    }

    pub fn interval(&self) -> TimeDelta {
        self.step
    }

    pub fn len(&self) -> usize {
        self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps == 0
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        let step = self.step;
        std::iter::successors(Some(self.start), move |ts| ts.checked_add_signed(step))
            .take(self.steps)
    }
}

/// Monday 00:00:00 of the week containing `now`.
pub fn start_of_week(now: NaiveDateTime) -> NaiveDateTime {
    let date = now.date();
    let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
    monday.and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn one_day_of_quarter_hours_has_96_steps() {
        let start = at(2025, 3, 3, 0, 0);
        let window = TimeWindow::new(
            start,
            Duration::from_secs(86_400),
            Duration::from_secs(900),
        )
        .unwrap();
        assert_eq!(window.len(), 96);
        assert_eq!(window.timestamps().count(), 96);
        assert_eq!(window.timestamps().next(), Some(start));
        assert_eq!(window.last(), at(2025, 3, 3, 23, 45));
    }

    #[test]
    fn timestamps_are_evenly_spaced() {
        let window = TimeWindow::new(
            at(2025, 3, 3, 6, 0),
            Duration::from_secs(3 * 3600),
            Duration::from_secs(600),
        )
        .unwrap();
        let stamps: Vec<_> = window.timestamps().collect();
        for pair in stamps.windows(2) {
            assert_eq!(pair[1] - pair[0], TimeDelta::minutes(10));
        }
    }

    #[test]
    fn rejects_degenerate_windows() {
        let start = at(2025, 3, 3, 0, 0);
        assert_eq!(
            TimeWindow::new(start, Duration::from_secs(60), Duration::ZERO),
            Err(SimError::ZeroInterval)
        );
        assert_eq!(
            TimeWindow::new(start, Duration::ZERO, Duration::from_secs(60)),
            Err(SimError::ZeroDuration)
        );
        assert!(matches!(
            TimeWindow::new(start, Duration::from_secs(100), Duration::from_secs(30)),
            Err(SimError::UnevenWindow { .. })
        ));
    }

    #[test]
    fn start_of_week_anchors_to_monday_midnight() {
        let wednesday = at(2025, 3, 5, 14, 37);
        let monday = start_of_week(wednesday);
        assert_eq!(monday, at(2025, 3, 3, 0, 0));
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(start_of_week(monday), monday);

        let sunday = at(2025, 3, 9, 23, 59);
        assert_eq!(start_of_week(sunday), monday);
    }
}
