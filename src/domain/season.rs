use chrono::{Datelike, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Seasons run from 1 July to 30 June
pub const SEASON_START_MONTH: u32 = 7;

/// A football season, written `2024/25`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Season {
    start: NaiveDate,
    end: NaiveDate,
}

impl Season {
    pub fn starting(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, SEASON_START_MONTH, 1)?;
        let end = NaiveDate::from_ymd_opt(year + 1, SEASON_START_MONTH, 1)?;
        Some(Self { start, end })
    }

    /// The season a given date falls in
    pub fn containing(date: NaiveDate) -> Option<Self> {
        let year = if date.month() >= SEASON_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self::starting(year)
    }

    pub fn current() -> Option<Self> {
        Self::containing(Utc::now().date_naive())
    }

    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    /// First day of the season
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day after the season
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl FromStr for Season {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ValidationError::new(
                "season",
                format!("expected '2024', '2024/25' or '2024-25', got '{}'", s),
            )
        };

        let s = s.trim();
        let (first, second) = match s.split_once(['/', '-']) {
            Some((first, second)) => (first, Some(second)),
            None => (s, None),
        };

        let year: i32 = first.parse().map_err(|_| invalid())?;
        if !(1900..=9998).contains(&year) {
            return Err(invalid());
        }

        if let Some(second) = second {
            let next: i32 = second.parse().map_err(|_| invalid())?;
            let matches_next = match second.len() {
                2 => next == (year + 1) % 100,
                4 => next == year + 1,
                _ => false,
            };
            if !matches_next {
                return Err(invalid());
            }
        }

        Season::starting(year).ok_or_else(invalid)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.start_year();
        write!(f, "{}/{:02}", year, (year + 1) % 100)
    }
}

impl Serialize for Season {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
