use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Below this percentage the countdown labels are drawn brighter.
pub const LOW_PROGRESS_PERCENT: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl TimeRemaining {
    pub fn from_millis(total: i64) -> Self {
        let total = total.max(0);
        let secs = total / 1000;
        let mins = secs / 60;
        let hours = mins / 60;
        TimeRemaining {
            days: hours / 24,
            hours: hours % 24,
            minutes: mins % 60,
            seconds: secs % 60,
            milliseconds: total % 1000,
        }
    }
}

pub fn start_of_year(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// The last millisecond of December 31st.
pub fn end_of_year(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 12, 31)?.and_hms_milli_opt(23, 59, 59, 999)
}

/// Time left until the end of `now`'s year, never negative.
pub fn time_remaining(now: NaiveDateTime) -> TimeRemaining {
    let millis = end_of_year(now.year())
        .map(|end| (end - now).num_milliseconds())
        .unwrap_or(0);
    TimeRemaining::from_millis(millis)
}

/// Share of the year elapsed at `now`, clamped to 0..=100.
pub fn year_progress_percent(now: NaiveDateTime) -> f64 {
    let (start, end) = match (start_of_year(now.year()), end_of_year(now.year())) {
        (Some(s), Some(e)) => (s, e),
        _ => return 0.0,
    };
    let elapsed = (now - start).num_milliseconds() as f64;
    let total = (end - start).num_milliseconds() as f64;
    if total <= 0.0 {
        return 0.0;
    }
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

pub fn is_low_progress(percent: f64) -> bool {
    percent < LOW_PROGRESS_PERCENT
}
