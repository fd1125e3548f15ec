use crate::calc::calendar::month_name;
use crate::calc::{holidays_for_year, HolidayEntry};
use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

#[derive(Serialize)]
struct HolidayRow<'a> {
    date: Option<NaiveDate>,
    name: &'a str,
}

pub fn run(year: Option<i32>, json: bool) -> Result<()> {
    let year = year.unwrap_or_else(|| Local::now().year());
    let holidays = holidays_for_year(year);
    let mut out = std::io::stdout().lock();
    if json {
        write_holidays_json(year, &holidays, &mut out)
    } else {
        write_holidays(year, &holidays, &mut out)
    }
}

pub(crate) fn write_holidays<W: std::io::Write>(
    year: i32,
    holidays: &[HolidayEntry],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Holidays {year}")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {:<11} {}", "Date", "Weekday", "Name")?;
    for h in holidays {
        let day = format!("{} {}", month_name(h.month + 1), h.day);
        let weekday = h
            .date(year)
            .map(|d| d.format("%A").to_string())
            .unwrap_or_default();
        writeln!(out, "  {:<14} {:<11} {}", day, weekday, h.name)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} holiday(s)", holidays.len())?;
    Ok(())
}

pub(crate) fn write_holidays_json<W: std::io::Write>(
    year: i32,
    holidays: &[HolidayEntry],
    out: &mut W,
) -> Result<()> {
    let rows: Vec<HolidayRow> = holidays
        .iter()
        .map(|h| HolidayRow {
            date: h.date(year),
            name: &h.name,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows).context("failed to serialize holidays")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(year: i32) -> String {
        let mut buf = Vec::new();
        write_holidays(year, &holidays_for_year(year), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_holidays_empty() {
        let mut buf = Vec::new();
        write_holidays(2025, &[], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Total: 0 holiday(s)"));
    }

    #[test]
    fn test_write_holidays_full_year() {
        let out = render(2024);
        assert!(out.contains("Holidays 2024"));
        assert!(out.contains("Total: 11 holiday(s)"));
        assert!(out.contains("November 28"));
        assert!(out.contains("Thanksgiving Day"));
    }

    #[test]
    fn test_write_holidays_weekday_column() {
        let out = render(2025);
        let line = out.lines().find(|l| l.contains("Independence Day")).unwrap();
        assert!(line.contains("July 4"));
        assert!(line.contains("Friday"));
    }

    #[test]
    fn test_write_holidays_json() {
        let mut buf = Vec::new();
        write_holidays_json(2024, &holidays_for_year(2024), &mut buf).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0]["date"], "2024-01-01");
        assert_eq!(rows[0]["name"], "New Year's Day");
    }
}
