//! Anime seasons and the clock used to find the current one.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Anime season (quarter of the year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    /// Season containing calendar month `month` (1-12)
    ///
    /// Quarters are fixed: Jan-Mar winter, Apr-Jun spring, Jul-Sep summer,
    /// Oct-Dec fall. Out-of-range months are treated as fall.
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }

    /// Path segment used by the seasons endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            _ => Err(anyhow::anyhow!("Invalid season: {}", s)),
        }
    }
}

/// Source of "today" for date-dependent lookups
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Year and season containing today
    fn current_season(&self) -> (i32, Season) {
        let today = self.today();
        (today.year(), Season::from_month(today.month()))
    }
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(year: i32, month: u32, day: u32) -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Winter);
        assert_eq!(Season::from_month(4), Season::Spring);
        assert_eq!(Season::from_month(6), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(9), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Fall);
        assert_eq!(Season::from_month(12), Season::Fall);
    }

    #[test]
    fn test_every_month_maps_to_its_quarter() {
        for month in 1..=12u32 {
            let expected = Season::ALL[((month - 1) / 3) as usize];
            assert_eq!(Season::from_month(month), expected, "month {}", month);
        }
    }

    #[test]
    fn test_current_season_from_clock() {
        assert_eq!(on(2024, 1, 1).current_season(), (2024, Season::Winter));
        assert_eq!(on(2024, 4, 1).current_season(), (2024, Season::Spring));
        assert_eq!(on(2025, 7, 15).current_season(), (2025, Season::Summer));
        assert_eq!(on(2025, 12, 31).current_season(), (2025, Season::Fall));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Spring".parse::<Season>().unwrap(), Season::Spring);
        assert_eq!("autumn".parse::<Season>().unwrap(), Season::Fall);
        assert!("monsoon".parse::<Season>().is_err());
        assert_eq!(Season::Summer.to_string(), "summer");
    }
}
