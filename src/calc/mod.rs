pub mod calendar;
pub mod countdown;
pub mod format;
pub mod season;

pub use calendar::{
    holidays_for_year, is_leap_year, solstice_dates_for_year, HolidayEntry, SolsticePair,
};
pub use countdown::{is_low_progress, time_remaining, year_progress_percent, TimeRemaining};
pub use format::{DateFormatter, DEFAULT_LOCALE};
pub use season::{season_for, Season};
