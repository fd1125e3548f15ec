use chrono::{Locale, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

pub const DEFAULT_LOCALE: &str = "en-US";

/// strftime patterns for one locale's field order and clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Patterns {
    long_date: &'static str,
    date_line: &'static str,
    time: &'static str,
    time_millis: &'static str,
}

const MONTH_FIRST: (&str, &str) = ("%A, %B %-d, %Y", "%B %-d, %Y");
const DAY_FIRST: (&str, &str) = ("%A %-d %B %Y", "%-d %B %Y");
const DAY_DOT: (&str, &str) = ("%A, %-d. %B %Y", "%-d. %B %Y");
const YEAR_FIRST_CJK: (&str, &str) = ("%Y年%-m月%-d日%A", "%Y年%-m月%-d日");

const CLOCK_12H: (&str, &str) = ("%-I:%M:%S %p", "%-I:%M:%S%.3f %p");
const CLOCK_24H: (&str, &str) = ("%H:%M:%S", "%H:%M:%S%.3f");

impl Patterns {
    fn new(dates: (&'static str, &'static str), clock: (&'static str, &'static str)) -> Self {
        Patterns {
            long_date: dates.0,
            date_line: dates.1,
            time: clock.0,
            time_millis: clock.1,
        }
    }
}

/// Locale-aware date and time formatting for the widget.
///
/// Tags are accepted in BCP 47 (`en-US`) or POSIX (`en_US.UTF-8`) form. When
/// the tag is not a known locale the formatter falls back to chrono's default
/// English names; formatting itself never fails.
#[derive(Clone, Debug)]
pub struct DateFormatter {
    tag: String,
    locale: Option<Locale>,
    patterns: Patterns,
}

impl DateFormatter {
    pub fn new(tag: &str) -> Self {
        let locale = parse_locale(tag);
        if locale.is_none() {
            warn!(locale = tag, "unknown locale, using default date formatting");
        }
        DateFormatter {
            tag: tag.to_string(),
            locale,
            patterns: patterns_for(tag, locale),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Weekday, month, day and year in the locale's order, e.g.
    /// "Monday, January 15, 2024" or "lundi 15 janvier 2024".
    pub fn long_date(&self, date: NaiveDate) -> String {
        self.render(date.and_time(NaiveTime::MIN), self.patterns.long_date)
    }

    pub fn date_line(&self, date: NaiveDate) -> String {
        self.render(date.and_time(NaiveTime::MIN), self.patterns.date_line)
    }

    pub fn time_line(&self, now: NaiveDateTime, with_millis: bool) -> String {
        let fmt = if with_millis {
            self.patterns.time_millis
        } else {
            self.patterns.time
        };
        self.render(now, fmt)
    }

    fn render(&self, at: NaiveDateTime, fmt: &str) -> String {
        match self.locale {
            Some(locale) => at.and_utc().format_localized(fmt, locale).to_string(),
            None => at.format(fmt).to_string(),
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        DateFormatter::new(DEFAULT_LOCALE)
    }
}

/// Strips encoding/modifier suffixes and normalises the separator to `_`.
fn normalize_tag(tag: &str) -> String {
    tag.split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('-', "_")
}

fn parse_locale(tag: &str) -> Option<Locale> {
    let base = normalize_tag(tag);
    if base.is_empty() {
        return None;
    }
    Locale::try_from(base.as_str()).ok()
}

/// Field order comes from the language (and region, for English); the clock is
/// 24-hour whenever the locale has no AM/PM marker.
fn patterns_for(tag: &str, locale: Option<Locale>) -> Patterns {
    let Some(locale) = locale else {
        return Patterns::new(MONTH_FIRST, CLOCK_12H);
    };
    let base = normalize_tag(tag);
    let mut parts = base.split('_');
    let language = parts.next().unwrap_or_default();
    let region = parts.next().unwrap_or_default();

    let dates = match language {
        "en" if matches!(region, "" | "US" | "CA" | "PH") => MONTH_FIRST,
        "de" | "da" | "nb" | "nn" | "no" | "fi" | "cs" | "sk" => DAY_DOT,
        "ja" | "zh" => YEAR_FIRST_CJK,
        _ => DAY_FIRST,
    };
    let clock = if has_am_pm(locale) { CLOCK_12H } else { CLOCK_24H };
    Patterns::new(dates, clock)
}

fn has_am_pm(locale: Locale) -> bool {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(13, 0, 0))
        .map(|noon| {
            !noon
                .and_utc()
                .format_localized("%p", locale)
                .to_string()
                .trim()
                .is_empty()
        })
        .unwrap_or(false)
}
