use crate::calc::DateFormatter;
use crate::data::FeatureFlags;
use crate::grid::day_of_year;
use crate::grid::model::classify_day;
use crate::ui::year_view::{countdown_units, Snapshot};
use anyhow::Result;
use chrono::{Datelike, Local};

pub fn run(flags: FeatureFlags, locale: &str) -> Result<()> {
    let formatter = DateFormatter::new(locale);
    let snapshot = Snapshot::capture(Local::now().naive_local(), &flags, &formatter);
    write_status(&snapshot, flags.show_milliseconds, &mut std::io::stdout())
}

pub(crate) fn write_status<W: std::io::Write>(
    snap: &Snapshot,
    show_ms: bool,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", snap.date_line)?;
    writeln!(out, "{}", snap.time_line)?;
    writeln!(out, "---")?;
    let countdown: Vec<String> = countdown_units(&snap.remaining, show_ms)
        .into_iter()
        .map(|(n, label)| format!("{n} {label}"))
        .collect();
    writeln!(out, "{:<26} {}", "Until end of year:", countdown.join(", "))?;
    writeln!(
        out,
        "{:<26} {:.2}% of {}",
        "Year elapsed:",
        snap.progress,
        snap.now.year()
    )?;
    // Always annotate the one-shot report, whatever the grid flags say.
    let annotate = FeatureFlags {
        show_grid: true,
        show_holidays: true,
        show_solstice: true,
        ..FeatureFlags::default()
    };
    let today = classify_day(snap.now.year(), day_of_year(snap.now), snap.now, &annotate);
    match today.label {
        Some(label) => writeln!(out, "{:<26} {} ({})", "Today:", today.class.tag(), label)?,
        None => writeln!(out, "{:<26} {}", "Today:", today.class.tag())?,
    }
    if let Some(season) = snap.season {
        writeln!(out, "{:<26} {}", "Season:", season.name())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snapshot(flags: FeatureFlags) -> Snapshot {
        let now = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 998)
            .unwrap();
        Snapshot::capture(now, &flags, &DateFormatter::new("en-US"))
    }

    fn render(flags: FeatureFlags) -> String {
        let mut buf = Vec::new();
        write_status(&snapshot(flags), flags.show_milliseconds, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_status_last_moments_of_year() {
        let out = render(FeatureFlags::default());
        assert!(out.contains("December 31, 2024"));
        assert!(out.contains("0 Days, 00 Hours, 00 Minutes, 00 Seconds"));
        assert!(out.contains("100.00% of 2024"));
        assert!(!out.contains("Season:"));
        assert!(out.contains("today"));
    }

    #[test]
    fn test_write_status_names_holiday() {
        let now = NaiveDate::from_ymd_opt(2025, 12, 25)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let snap = Snapshot::capture(now, &FeatureFlags::default(), &DateFormatter::new("en-US"));
        let mut buf = Vec::new();
        write_status(&snap, false, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("holiday (Christmas Day)"));
    }

    #[test]
    fn test_write_status_names_shortest_day() {
        let now = NaiveDate::from_ymd_opt(2025, 12, 21)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let snap = Snapshot::capture(now, &FeatureFlags::default(), &DateFormatter::new("en-US"));
        let mut buf = Vec::new();
        write_status(&snap, false, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("shortest-day (Shortest Day)"));
    }

    #[test]
    fn test_write_status_with_millis_and_season() {
        let out = render(FeatureFlags {
            show_milliseconds: true,
            style_season: true,
            ..Default::default()
        });
        assert!(out.contains("001 ms"));
        assert!(out.contains("11:59:59.998 PM"));
        assert!(out.contains("winter"));
    }
}
