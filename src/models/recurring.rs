//! Recurring payment model
//!
//! A recurring payment is charged once in every month of an inclusive
//! `[start, end]` range.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::expense::{validate_amount_and_note, RecordValidationError};
use super::ids::RecurringId;
use super::money::Money;
use super::month::{MonthRange, YearMonth};

/// A payment active for every month between `start` and `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringRecord {
    pub id: RecurringId,
    pub amount: Money,
    pub note: String,
    pub start: YearMonth,
    pub end: YearMonth,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Identifier the record had in an imported legacy `data.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

impl RecurringRecord {
    /// Create a new recurring payment
    pub fn new(amount: Money, note: impl Into<String>, start: YearMonth, end: YearMonth) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringId::new(),
            amount,
            note: note.into().trim().to_string(),
            start,
            end,
            created_at: now,
            updated_at: now,
            legacy_id: None,
        }
    }

    /// Whether the payment is charged in the given month (inclusive on both ends)
    pub fn is_active_in(&self, period: &YearMonth) -> bool {
        period.is_within(&self.start, &self.end)
    }

    /// Every month the payment is charged in
    pub fn months(&self) -> MonthRange {
        self.start.months_through(self.end)
    }

    /// Number of months in the range
    pub fn month_count(&self) -> usize {
        let span = (self.end.year - self.start.year) * 12
            + self.end.month.index() as i32
            - self.start.month.index() as i32
            + 1;
        span.max(0) as usize
    }

    /// Total charged over the whole range, `None` if it does not fit
    pub fn total_amount(&self) -> Option<Money> {
        self.amount.checked_times(self.month_count())
    }

    /// Replace every mutable field
    pub fn edit(
        &mut self,
        amount: Money,
        note: impl Into<String>,
        start: YearMonth,
        end: YearMonth,
    ) {
        self.amount = amount;
        self.note = note.into().trim().to_string();
        self.start = start;
        self.end = end;
        self.updated_at = Utc::now();
    }

    /// Validate the payment, including start-not-after-end
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_amount_and_note(self.amount, &self.note)?;
        if self.start.ordinal() > self.end.ordinal() {
            return Err(RecordValidationError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}
