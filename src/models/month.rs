//! Calendar months and the year/month ordinal
//!
//! Every record is bucketed by a `(year, month)` pair. `YearMonth::ordinal`
//! encodes such a pair as `year * 100 + month_number`, which sorts exactly
//! like the calendar because the month component never reaches 100.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Lowest and highest year accepted at the input boundary (four digits)
pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;

/// One of the twelve canonical months
///
/// The serialized form is the German month name, which is also the name
/// used in persisted income keys (`"2025 - März"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "Januar")]
    January,
    #[serde(rename = "Februar")]
    February,
    #[serde(rename = "März")]
    March,
    #[serde(rename = "April")]
    April,
    #[serde(rename = "Mai")]
    May,
    #[serde(rename = "Juni")]
    June,
    #[serde(rename = "Juli")]
    July,
    #[serde(rename = "August")]
    August,
    #[serde(rename = "September")]
    September,
    #[serde(rename = "Oktober")]
    October,
    #[serde(rename = "November")]
    November,
    #[serde(rename = "Dezember")]
    December,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    const CANONICAL_NAMES: [&'static str; 12] = [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ];

    const ENGLISH_NAMES: [&'static str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    /// Zero-based position in the canonical list (January = 0)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// One-based month number (January = 1)
    pub const fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Month at a zero-based index, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Month for a one-based number, if in range
    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Self::from_index(i as usize))
    }

    /// Canonical (persisted) name
    pub fn name(self) -> &'static str {
        Self::CANONICAL_NAMES[self.index()]
    }

    /// English display name
    pub fn english_name(self) -> &'static str {
        Self::ENGLISH_NAMES[self.index()]
    }

    /// The following month, wrapping December to January
    pub fn succ(self) -> Self {
        Self::ALL[(self.index() + 1) % 12]
    }

    /// Parse a month from user input
    ///
    /// Accepts canonical names, English names, three-letter abbreviations
    /// of either, and numbers 1-12. Matching ignores case.
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();

        if let Ok(number) = lower.parse::<u32>() {
            return Self::from_number(number)
                .ok_or_else(|| PeriodParseError::InvalidMonth(trimmed.to_string()));
        }

        let aliases: [(&str, Month); 3] = [
            ("maerz", Month::March),
            ("marz", Month::March),
            ("sept", Month::September),
        ];
        if let Some((_, month)) = aliases.iter().find(|(alias, _)| *alias == lower) {
            return Ok(*month);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|m| {
                let german = m.name().to_lowercase();
                let english = m.english_name().to_lowercase();
                lower == german
                    || lower == english
                    || (lower.chars().count() == 3 && english.starts_with(&lower))
                    || (lower.chars().count() == 3 && german.starts_with(&lower))
            })
            .ok_or_else(|| PeriodParseError::InvalidMonth(trimmed.to_string()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Order-preserving integer for a `(year, month)` pair
pub const fn ordinal(year: i32, month: Month) -> i32 {
    year * 100 + month.number() as i32
}

/// Check a year against the four-digit range accepted at the boundary
pub fn validate_year(year: i32) -> Result<i32, PeriodParseError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(PeriodParseError::InvalidYear(year.to_string()))
    }
}

fn parse_year(s: &str) -> Result<i32, PeriodParseError> {
    let s = s.trim();
    let year: i32 = s
        .parse()
        .map_err(|_| PeriodParseError::InvalidYear(s.to_string()))?;
    validate_year(year)
}

/// A calendar month in a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    /// Create a year/month pair
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The year/month containing a date
    pub fn from_date(date: NaiveDate) -> Self {
        let month = Month::from_number(date.month()).unwrap_or(Month::January);
        Self::new(date.year(), month)
    }

    /// The current local year/month
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Ordinal used for range containment and chronological sorting
    pub const fn ordinal(&self) -> i32 {
        ordinal(self.year, self.month)
    }

    /// The following month, rolling over into the next year after December
    pub fn next(&self) -> Self {
        match self.month {
            Month::December => Self::new(self.year + 1, Month::January),
            month => Self::new(self.year, month.succ()),
        }
    }

    /// The preceding month, rolling back into the previous year before January
    pub fn prev(&self) -> Self {
        match self.month {
            Month::January => Self::new(self.year - 1, Month::December),
            month => Self::new(self.year, Month::ALL[month.index() - 1]),
        }
    }

    /// Whether `self` lies in the inclusive range `[start, end]`
    pub fn is_within(&self, start: &YearMonth, end: &YearMonth) -> bool {
        let value = self.ordinal();
        start.ordinal() <= value && value <= end.ordinal()
    }

    /// Iterate every month from `self` through `end`, inclusive
    ///
    /// Yields nothing when `end` precedes `self`.
    pub fn months_through(&self, end: YearMonth) -> MonthRange {
        MonthRange {
            next: Some(*self),
            end,
        }
    }

    /// ISO-style representation (`2025-03`)
    pub fn to_iso(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month.number())
    }

    /// Parse a year/month from user input
    ///
    /// Formats:
    /// - `2025-03` or `2025-3`
    /// - `2025 - März` (the persisted income key form)
    /// - `März 2025`, `March 2025`, `mar 2025`
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((year, month)) = s.split_once(" - ") {
            return Ok(Self::new(parse_year(year)?, Month::parse(month)?));
        }

        if let Some((year, month)) = s.split_once('-') {
            if month.trim().parse::<u32>().is_err() {
                return Err(PeriodParseError::InvalidFormat(s.to_string()));
            }
            return Ok(Self::new(parse_year(year)?, Month::parse(month)?));
        }

        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() == 2 {
            return Ok(Self::new(parse_year(parts[1])?, Month::parse(parts[0])?));
        }

        Err(PeriodParseError::InvalidFormat(s.to_string()))
    }
}

impl Ord for YearMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

impl FromStr for YearMonth {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Inclusive month-by-month walk between two year/month values
#[derive(Debug, Clone)]
pub struct MonthRange {
    next: Option<YearMonth>,
    end: YearMonth,
}

impl Iterator for MonthRange {
    type Item = YearMonth;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if current > self.end {
            self.next = None;
            return None;
        }
        self.next = if current == self.end {
            None
        } else {
            Some(current.next())
        };
        Some(current)
    }
}

/// Error type for month and period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(String),
    InvalidYear(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(s) => write!(f, "Invalid month: {}", s),
            PeriodParseError::InvalidYear(s) => {
                write!(f, "Invalid year: {} (expected four digits)", s)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
