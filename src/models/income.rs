//! Monthly income model
//!
//! At most one income record exists per `(year, month)`. The key is a
//! structured value in memory and the string `"{year} - {month}"` on disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::month::{Month, PeriodParseError, YearMonth};

/// Validation errors for income records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NonPositiveAmount,
    AmountTooLarge,
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Income must be greater than zero"),
            Self::AmountTooLarge => write!(f, "Income cannot exceed {}", Money::MAX),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// Composite `(year, month)` key of an income record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncomeKey(YearMonth);

impl IncomeKey {
    /// Key for a year and month
    pub const fn new(year: i32, month: Month) -> Self {
        Self(YearMonth::new(year, month))
    }

    /// The month this key identifies
    pub const fn period(&self) -> YearMonth {
        self.0
    }
}

impl From<YearMonth> for IncomeKey {
    fn from(period: YearMonth) -> Self {
        Self(period)
    }
}

impl fmt::Display for IncomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.0.year, self.0.month)
    }
}

impl FromStr for IncomeKey {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once(" - ")
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| PeriodParseError::InvalidYear(year.to_string()))?;
        let month = Month::parse(month)?;
        Ok(Self::new(year, month))
    }
}

impl Serialize for IncomeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IncomeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Income for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub amount: Money,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl IncomeRecord {
    /// Create a new income record
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            notes: String::new(),
            updated_at: Some(Utc::now()),
        }
    }

    /// Set the amount
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Some(Utc::now());
    }

    /// Set notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.updated_at = Some(Utc::now());
    }

    /// Validate the income record
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if !self.amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveAmount);
        }
        if !self.amount.is_valid_record_amount() {
            return Err(IncomeValidationError::AmountTooLarge);
        }
        Ok(())
    }
}
