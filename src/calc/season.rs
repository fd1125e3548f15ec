use chrono::{Datelike, NaiveDate};

/// Region codes whose locales are treated as southern hemisphere.
const SOUTHERN_REGIONS: [&str; 11] = [
    "AU", "NZ", "ZA", "AR", "BR", "CL", "UY", "PY", "BO", "PE", "EC",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    fn opposite(self) -> Self {
        match self {
            Season::Spring => Season::Autumn,
            Season::Summer => Season::Winter,
            Season::Autumn => Season::Spring,
            Season::Winter => Season::Summer,
        }
    }
}

/// True when the locale's region subtag (`en-AU`, `es_AR.UTF-8`) is southern.
pub fn is_southern_locale(locale: &str) -> bool {
    let upper = locale.to_uppercase().replace('_', "-");
    SOUTHERN_REGIONS
        .iter()
        .any(|code| upper.contains(&format!("-{code}")))
}

/// Meteorological season for `date`: Mar–May, Jun–Aug, Sep–Nov, Dec–Feb.
pub fn season_for(date: NaiveDate, locale: &str) -> Season {
    let northern = match date.month0() {
        2..=4 => Season::Spring,
        5..=7 => Season::Summer,
        8..=10 => Season::Autumn,
        _ => Season::Winter,
    };
    if is_southern_locale(locale) {
        northern.opposite()
    } else {
        northern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, 15).unwrap()
    }

    #[test]
    fn test_northern_seasons() {
        assert_eq!(season_for(d(1), "en-US"), Season::Winter);
        assert_eq!(season_for(d(4), "en-US"), Season::Spring);
        assert_eq!(season_for(d(7), "en-US"), Season::Summer);
        assert_eq!(season_for(d(10), "en-US"), Season::Autumn);
        assert_eq!(season_for(d(12), "en-US"), Season::Winter);
    }

    #[test]
    fn test_southern_seasons_are_flipped() {
        assert_eq!(season_for(d(1), "en-AU"), Season::Summer);
        assert_eq!(season_for(d(4), "es-AR"), Season::Autumn);
        assert_eq!(season_for(d(7), "pt_BR.UTF-8"), Season::Winter);
        assert_eq!(season_for(d(10), "en-nz"), Season::Spring);
    }

    #[test]
    fn test_language_only_locale_is_northern() {
        assert!(!is_southern_locale("en"));
        assert!(!is_southern_locale(""));
    }

    #[test]
    fn test_season_names() {
        assert_eq!(Season::Autumn.name(), "autumn");
        assert_eq!(Season::Winter.name(), "winter");
    }
}
