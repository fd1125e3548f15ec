use chrono::{Datelike, NaiveDate, Weekday};

/// Passing this as `n` to [`nth_weekday_of_month`] selects the last occurrence.
pub const LAST_OCCURRENCE: u32 = 5;

/// A holiday resolved for one specific year. `month` is 0-indexed (0 = January).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayEntry {
    pub month: u32,
    pub day: u32,
    pub name: String,
}

impl HolidayEntry {
    pub fn new(month: u32, day: u32, name: &str) -> Self {
        HolidayEntry {
            month,
            day,
            name: name.to_string(),
        }
    }

    pub fn date(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month.checked_add(1)?, self.day)
    }
}

/// Approximate longest and shortest days of a year.
///
/// These are fixed calendar days (June 21 and December 21), not the
/// astronomical solstice instants, which drift by a day or so between years.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolsticePair {
    pub longest: NaiveDate,
    pub shortest: NaiveDate,
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Last calendar day of a 0-indexed month.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 11 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month.checked_add(2)?)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Day-of-month of the `n`th `weekday` in a 0-indexed `month`.
///
/// `n` in 1..=4 counts forward from the 1st; [`LAST_OCCURRENCE`] scans backward
/// from the month's last day. Returns `None` for any other `n`, an invalid
/// month, or when the month has fewer than `n` matching weekdays.
pub fn nth_weekday_of_month(n: u32, weekday: Weekday, month: u32, year: i32) -> Option<u32> {
    if n == LAST_OCCURRENCE {
        let last = last_day_of_month(year, month)?;
        return std::iter::successors(Some(last), |d| d.pred_opt())
            .take_while(|d| d.month0() == month)
            .find(|d| d.weekday() == weekday)
            .map(|d| d.day());
    }
    if !(1..=4).contains(&n) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)?;
    first
        .iter_days()
        .take_while(|d| d.month0() == month)
        .filter(|d| d.weekday() == weekday)
        .nth((n - 1) as usize)
        .map(|d| d.day())
}

/// US federal holidays for `year`, sorted by (month, day).
pub fn holidays_for_year(year: i32) -> Vec<HolidayEntry> {
    let mut holidays = vec![
        HolidayEntry::new(0, 1, "New Year's Day"),
        HolidayEntry::new(5, 19, "Juneteenth"),
        HolidayEntry::new(6, 4, "Independence Day"),
        HolidayEntry::new(10, 11, "Veterans Day"),
        HolidayEntry::new(11, 25, "Christmas Day"),
    ];

    let computed = [
        (3, Weekday::Mon, 0, "Martin Luther King Jr. Day"),
        (3, Weekday::Mon, 1, "Presidents' Day"),
        (LAST_OCCURRENCE, Weekday::Mon, 4, "Memorial Day"),
        (1, Weekday::Mon, 8, "Labor Day"),
        (2, Weekday::Mon, 9, "Columbus Day"),
        (4, Weekday::Thu, 10, "Thanksgiving Day"),
    ];
    for (n, weekday, month, name) in computed {
        if let Some(day) = nth_weekday_of_month(n, weekday, month, year) {
            holidays.push(HolidayEntry::new(month, day, name));
        }
    }

    holidays.sort_by_key(|h| (h.month, h.day));
    holidays
}

pub fn solstice_dates_for_year(year: i32) -> Option<SolsticePair> {
    Some(SolsticePair {
        longest: NaiveDate::from_ymd_opt(year, 6, 21)?,
        shortest: NaiveDate::from_ymd_opt(year, 12, 21)?,
    })
}

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_leap_year_matches_chrono() {
        for year in 1800..2400 {
            let has_feb_29 = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
            assert_eq!(is_leap_year(year), has_feb_29, "year {year}");
        }
    }

    #[test]
    fn test_third_monday_of_january_2024() {
        assert_eq!(nth_weekday_of_month(3, Weekday::Mon, 0, 2024), Some(15));
    }

    #[test]
    fn test_last_monday_of_may_2024() {
        assert_eq!(nth_weekday_of_month(5, Weekday::Mon, 4, 2024), Some(27));
    }

    #[test]
    fn test_first_occurrence_on_the_first() {
        // 2024-04-01 is a Monday
        assert_eq!(nth_weekday_of_month(1, Weekday::Mon, 3, 2024), Some(1));
    }

    #[test]
    fn test_last_occurrence_on_last_day() {
        // 2024-12-31 is a Tuesday
        assert_eq!(nth_weekday_of_month(LAST_OCCURRENCE, Weekday::Tue, 11, 2024), Some(31));
    }

    #[test]
    fn test_last_occurrence_in_leap_february() {
        // 2024-02-29 is a Thursday
        assert_eq!(nth_weekday_of_month(LAST_OCCURRENCE, Weekday::Thu, 1, 2024), Some(29));
        assert_eq!(nth_weekday_of_month(LAST_OCCURRENCE, Weekday::Thu, 1, 2023), Some(23));
    }

    #[test]
    fn test_out_of_range_n_is_none() {
        assert_eq!(nth_weekday_of_month(0, Weekday::Mon, 0, 2024), None);
        assert_eq!(nth_weekday_of_month(6, Weekday::Mon, 0, 2024), None);
    }

    #[test]
    fn test_invalid_month_is_none() {
        assert_eq!(nth_weekday_of_month(1, Weekday::Mon, 12, 2024), None);
        assert_eq!(nth_weekday_of_month(LAST_OCCURRENCE, Weekday::Mon, 12, 2024), None);
    }

    #[test]
    fn test_nth_weekday_result_has_requested_weekday() {
        for month in 0..12 {
            for n in 1..=LAST_OCCURRENCE {
                let day = nth_weekday_of_month(n, Weekday::Fri, month, 2025).unwrap();
                assert_eq!(d(2025, month + 1, day).weekday(), Weekday::Fri);
            }
        }
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 1), Some(d(2024, 2, 29)));
        assert_eq!(last_day_of_month(2025, 11), Some(d(2025, 12, 31)));
        assert_eq!(last_day_of_month(2025, 3), Some(d(2025, 4, 30)));
    }

    #[test]
    fn test_december_of_last_representable_year() {
        assert_eq!(last_day_of_month(i32::MAX, 11), None);
        assert_eq!(nth_weekday_of_month(LAST_OCCURRENCE, Weekday::Mon, 11, i32::MAX), None);
    }

    #[test]
    fn test_holidays_2024_count_and_order() {
        let holidays = holidays_for_year(2024);
        assert_eq!(holidays.len(), 11);
        let keys: Vec<_> = holidays.iter().map(|h| (h.month, h.day)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(keys.contains(&(0, 1)));
        assert!(keys.contains(&(10, 28)));
    }

    #[test]
    fn test_holidays_2024_computed_dates() {
        let holidays = holidays_for_year(2024);
        let find = |name: &str| holidays.iter().find(|h| h.name == name).map(|h| (h.month, h.day));
        assert_eq!(find("Martin Luther King Jr. Day"), Some((0, 15)));
        assert_eq!(find("Presidents' Day"), Some((1, 19)));
        assert_eq!(find("Memorial Day"), Some((4, 27)));
        assert_eq!(find("Labor Day"), Some((8, 2)));
        assert_eq!(find("Columbus Day"), Some((9, 14)));
        assert_eq!(find("Thanksgiving Day"), Some((10, 28)));
    }

    #[test]
    fn test_holiday_entry_date() {
        let h = HolidayEntry::new(6, 4, "Independence Day");
        assert_eq!(h.date(2025), Some(d(2025, 7, 4)));
        assert_eq!(HolidayEntry::new(1, 30, "Bogus").date(2025), None);
    }

    #[test]
    fn test_solstice_pair_is_fixed_days() {
        let pair = solstice_dates_for_year(2025).unwrap();
        assert_eq!(pair.longest, d(2025, 6, 21));
        assert_eq!(pair.shortest, d(2025, 12, 21));
    }

    #[test]
    fn test_month_name_known_values() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
    }
}
