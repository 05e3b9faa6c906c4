//! ---
//! so_section: "11-simulation"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Office calendar predicates driving the channel models."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use chrono::{Datelike, NaiveDateTime, Timelike};

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

pub fn is_weekday(ts: &NaiveDateTime) -> bool {
    ts.weekday().num_days_from_monday() < 5
}

/// Business hours: 08:00 to 18:00, Monday to Friday.
pub fn is_work_hour(ts: &NaiveDateTime) -> bool {
    is_weekday(ts) && (8..18).contains(&ts.hour())
}

pub fn is_night(ts: &NaiveDateTime) -> bool {
    ts.hour() >= 22 || ts.hour() < 6
}

/// The arrival and departure hours bracketing a working day.
pub fn is_transition_hour(ts: &NaiveDateTime) -> bool {
    is_weekday(ts) && matches!(ts.hour(), 7 | 18)
}

/// Weekend late morning, when unexpected occupancy spikes may occur.
pub fn is_weekend_peak_window(ts: &NaiveDateTime) -> bool {
    !is_weekday(ts) && (10..14).contains(&ts.hour())
}

/// Position within the day in `[0, 1)`.
pub fn day_fraction(ts: &NaiveDateTime) -> f64 {
    f64::from(ts.hour() * 60 + ts.minute()) / MINUTES_PER_DAY
}
