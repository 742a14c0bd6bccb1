//! Reporting period
//!
//! Expenses are fetched one window at a time: a calendar month or a whole
//! calendar year.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar window that scopes which expenses are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// A calendar month (e.g., "2025-01")
    Month { year: i32, month: u32 },

    /// A calendar year (e.g., "2025")
    Year { year: i32 },
}

impl Period {
    /// Create a monthly period, rejecting months outside 1..=12
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self::Month { year, month })
    }

    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// The month containing today's local date
    pub fn current_month() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the window
    pub fn start_date(&self) -> NaiveDate {
        let date = match self {
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 1, 1),
        };
        date.unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the window (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        let next_start = self.next().start_date();
        if next_start == NaiveDate::MIN {
            return NaiveDate::MAX;
        }
        next_start - Duration::days(1)
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Month { year, month } => date.year() == *year && date.month() == *month,
            Self::Year { year } => date.year() == *year,
        }
    }

    /// The following window of the same kind
    pub fn next(&self) -> Self {
        match *self {
            Self::Month { year, month: 12 } => Self::Month {
                year: year + 1,
                month: 1,
            },
            Self::Month { year, month } => Self::Month {
                year,
                month: month + 1,
            },
            Self::Year { year } => Self::Year { year: year + 1 },
        }
    }

    /// The preceding window of the same kind
    pub fn prev(&self) -> Self {
        match *self {
            Self::Month { year, month: 1 } => Self::Month {
                year: year - 1,
                month: 12,
            },
            Self::Month { year, month } => Self::Month {
                year,
                month: month - 1,
            },
            Self::Year { year } => Self::Year { year: year - 1 },
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2025-01"
    /// - Yearly: "2025"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        match s.split_once('-') {
            Some((year, month)) => {
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                Self::month(year, month)
            }
            None => {
                let year: i32 = s.parse().map_err(|_| invalid())?;
                Ok(Self::Year { year })
            }
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::current_month()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
