use crate::calc::{holidays_for_year, is_leap_year, solstice_dates_for_year, SolsticePair};
use crate::data::FeatureFlags;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

pub const GRID_ROWS: usize = 13;
pub const GRID_COLS: usize = 30;
pub const GRID_CAPACITY: usize = GRID_ROWS * GRID_COLS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayClass {
    Past,
    Today,
    Future,
    Holiday,
    LongestDay,
    ShortestDay,
}

impl DayClass {
    pub fn tag(self) -> &'static str {
        match self {
            DayClass::Past => "past",
            DayClass::Today => "today",
            DayClass::Future => "future",
            DayClass::Holiday => "holiday",
            DayClass::LongestDay => "longest-day",
            DayClass::ShortestDay => "shortest-day",
        }
    }
}

/// The single class a day cell carries, plus the name shown after its date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub class: DayClass,
    pub label: Option<String>,
}

impl Classification {
    fn plain(class: DayClass) -> Self {
        Classification { class, label: None }
    }

    fn labelled(class: DayClass, label: &str) -> Self {
        Classification {
            class,
            label: Some(label.to_string()),
        }
    }
}

pub fn day_count(year: i32) -> usize {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Whole days elapsed between January 1st 00:00 of `now`'s year and `now`.
pub fn day_of_year(now: NaiveDateTime) -> usize {
    NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|start| (now - start).num_days().max(0) as usize)
        .unwrap_or(0)
}

/// Per-year lookup tables for classifying every cell of one render pass.
///
/// Holiday and solstice tables are only built when their flag is on, so a
/// disabled annotation can never win the precedence check.
#[derive(Clone, Debug)]
pub struct YearAnnotations {
    year: i32,
    now_year: i32,
    today: usize,
    holidays: HashMap<NaiveDate, String>,
    solstice: Option<SolsticePair>,
}

impl YearAnnotations {
    pub fn new(year: i32, now: NaiveDateTime, flags: &FeatureFlags) -> Self {
        let holidays = if flags.show_holidays {
            holidays_for_year(year)
                .into_iter()
                .filter_map(|h| Some((h.date(year)?, h.name)))
                .collect()
        } else {
            HashMap::new()
        };
        let solstice = if flags.show_solstice {
            solstice_dates_for_year(year)
        } else {
            None
        };
        YearAnnotations {
            year,
            now_year: now.year(),
            today: day_of_year(now),
            holidays,
            solstice,
        }
    }

    /// Calendar date of a 0-indexed day of the year.
    pub fn date_of(&self, day_index: usize) -> Option<NaiveDate> {
        let ordinal = u32::try_from(day_index).ok()?.checked_add(1)?;
        NaiveDate::from_yo_opt(self.year, ordinal)
    }

    pub fn classify(&self, day_index: usize) -> Classification {
        if let Some(date) = self.date_of(day_index) {
            if let Some(name) = self.holidays.get(&date) {
                return Classification::labelled(DayClass::Holiday, name);
            }
            if let Some(pair) = &self.solstice {
                if date == pair.longest {
                    return Classification::labelled(DayClass::LongestDay, "Longest Day");
                }
                if date == pair.shortest {
                    return Classification::labelled(DayClass::ShortestDay, "Shortest Day");
                }
            }
        }
        Classification::plain(self.temporal_bucket(day_index))
    }

    fn temporal_bucket(&self, day_index: usize) -> DayClass {
        use std::cmp::Ordering;
        let position = self
            .year
            .cmp(&self.now_year)
            .then(day_index.cmp(&self.today));
        match position {
            Ordering::Less => DayClass::Past,
            Ordering::Equal => DayClass::Today,
            Ordering::Greater => DayClass::Future,
        }
    }
}

/// Classifies one day. Prefer [`YearAnnotations`] when classifying many.
pub fn classify_day(
    year: i32,
    day_index: usize,
    now: NaiveDateTime,
    flags: &FeatureFlags,
) -> Classification {
    YearAnnotations::new(year, now, flags).classify(day_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn all_annotations() -> FeatureFlags {
        FeatureFlags {
            show_grid: true,
            show_holidays: true,
            show_solstice: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_day_count_matches_leap_year() {
        for year in 1890..2110 {
            assert_eq!(day_count(year) == 366, is_leap_year(year), "year {year}");
        }
    }

    #[test]
    fn test_grid_fits_a_leap_year() {
        assert!(GRID_CAPACITY >= day_count(2024));
        assert_eq!(GRID_CAPACITY, 390);
    }

    #[test]
    fn test_day_of_year_bounds() {
        assert_eq!(day_of_year(at(2025, 1, 1, 0)), 0);
        assert_eq!(day_of_year(at(2025, 1, 1, 23)), 0);
        assert_eq!(day_of_year(at(2025, 2, 1, 12)), 31);
        assert_eq!(day_of_year(at(2024, 12, 31, 23)), 365);
    }

    #[test]
    fn test_temporal_buckets() {
        let flags = FeatureFlags::default();
        let now = at(2025, 3, 10, 9);
        let today = day_of_year(now);
        assert_eq!(classify_day(2025, today - 1, now, &flags).class, DayClass::Past);
        assert_eq!(classify_day(2025, today, now, &flags).class, DayClass::Today);
        assert_eq!(classify_day(2025, today + 1, now, &flags).class, DayClass::Future);
    }

    #[test]
    fn test_holiday_beats_today() {
        let now = at(2025, 7, 4, 10);
        let today = day_of_year(now);
        let c = classify_day(2025, today, now, &all_annotations());
        assert_eq!(c.class, DayClass::Holiday);
        assert_eq!(c.label.as_deref(), Some("Independence Day"));
    }

    #[test]
    fn test_holidays_ignored_when_flag_off() {
        let now = at(2025, 7, 4, 10);
        let flags = FeatureFlags {
            show_grid: true,
            ..Default::default()
        };
        let c = classify_day(2025, day_of_year(now), now, &flags);
        assert_eq!(c, Classification { class: DayClass::Today, label: None });
    }

    #[test]
    fn test_solstice_classes() {
        let now = at(2025, 1, 2, 0);
        let flags = all_annotations();
        let june_21 = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap().ordinal0() as usize;
        let dec_21 = NaiveDate::from_ymd_opt(2025, 12, 21).unwrap().ordinal0() as usize;
        let longest = classify_day(2025, june_21, now, &flags);
        assert_eq!(longest.class, DayClass::LongestDay);
        assert_eq!(longest.label.as_deref(), Some("Longest Day"));
        assert_eq!(classify_day(2025, dec_21, now, &flags).class, DayClass::ShortestDay);
    }

    #[test]
    fn test_solstice_needs_its_flag() {
        let now = at(2025, 1, 2, 0);
        let flags = FeatureFlags {
            show_grid: true,
            show_holidays: true,
            ..Default::default()
        };
        let june_21 = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap().ordinal0() as usize;
        assert_eq!(classify_day(2025, june_21, now, &flags).class, DayClass::Future);
    }

    #[test]
    fn test_other_years_are_entirely_past_or_future() {
        let now = at(2025, 6, 1, 0);
        let flags = FeatureFlags::default();
        assert_eq!(classify_day(2024, 364, now, &flags).class, DayClass::Past);
        assert_eq!(classify_day(2026, 0, now, &flags).class, DayClass::Future);
    }

    #[test]
    fn test_date_of_index() {
        let ann = YearAnnotations::new(2024, at(2024, 1, 1, 0), &FeatureFlags::default());
        assert_eq!(ann.date_of(0), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(ann.date_of(365), NaiveDate::from_ymd_opt(2024, 12, 31));
        assert_eq!(ann.date_of(366), None);
    }

    #[test]
    fn test_class_tags() {
        assert_eq!(DayClass::LongestDay.tag(), "longest-day");
        assert_eq!(DayClass::Today.tag(), "today");
    }
}
