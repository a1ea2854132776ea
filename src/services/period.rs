//! Period service
//!
//! Turns period arguments from the command line into months and years,
//! relative to the current month.

use crate::error::{MonthbookError, MonthbookResult};
use crate::models::{month::validate_year, Month, YearMonth};

/// Service for resolving period arguments
pub struct PeriodService {
    current: YearMonth,
}

impl Default for PeriodService {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodService {
    /// Resolve periods relative to today's month
    pub fn new() -> Self {
        Self::anchored_at(YearMonth::current())
    }

    /// Resolve periods relative to a fixed month
    pub fn anchored_at(current: YearMonth) -> Self {
        Self { current }
    }

    /// The month periods are resolved against
    pub fn current_period(&self) -> YearMonth {
        self.current
    }

    /// Parse a period argument or fall back to the current month
    pub fn parse_or_current(&self, period: Option<&str>) -> MonthbookResult<YearMonth> {
        match period {
            Some(s) => self.parse(s),
            None => Ok(self.current),
        }
    }

    /// Parse a period argument
    ///
    /// Formats supported:
    /// - `now`, `current`, `this`, `last`, `prev`, `next`
    /// - a month name or number alone (`März`, `mar`, `3`): that month of the current year
    /// - `2025-03`, `März 2025`, `2025 - März`
    pub fn parse(&self, s: &str) -> MonthbookResult<YearMonth> {
        let trimmed = s.trim();

        let relative = match trimmed.to_lowercase().as_str() {
            "now" | "current" | "this" => Some(self.current),
            "last" | "prev" | "previous" => Some(self.current.prev()),
            "next" => Some(self.current.next()),
            _ => None,
        };
        if let Some(period) = relative {
            return checked_year(period.year).map(|_| period);
        }

        if let Ok(month) = Month::parse(trimmed) {
            return Ok(YearMonth::new(self.current.year, month));
        }

        YearMonth::parse(trimmed)
            .map_err(|e| MonthbookError::Validation(format!("Invalid period '{}': {}", s, e)))
    }

    /// Parse a year argument or fall back to the current year
    pub fn parse_year_or_current(&self, year: Option<&str>) -> MonthbookResult<i32> {
        let Some(s) = year else {
            return Ok(self.current.year);
        };

        match s.trim().to_lowercase().as_str() {
            "now" | "current" | "this" => checked_year(self.current.year),
            "last" | "prev" | "previous" => checked_year(self.current.year - 1),
            "next" => checked_year(self.current.year + 1),
            other => other
                .parse::<i32>()
                .ok()
                .and_then(|y| validate_year(y).ok())
                .ok_or_else(|| MonthbookError::Validation(format!("Invalid year: {}", s))),
        }
    }
}

fn checked_year(year: i32) -> MonthbookResult<i32> {
    validate_year(year).map_err(|e| MonthbookError::Validation(e.to_string()))
}
