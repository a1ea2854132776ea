//! One-off expense model
//!
//! A one-off expense belongs to exactly one calendar month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;
use super::month::{Month, YearMonth};

/// Validation errors shared by expense and recurring records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    EmptyNote,
    EndBeforeStart { start: YearMonth, end: YearMonth },
}

impl std::fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than zero"),
            Self::AmountTooLarge => write!(f, "Amount cannot exceed {}", Money::MAX),
            Self::EmptyNote => write!(f, "Note cannot be empty"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "End month {} lies before start month {}", end, start)
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Check the amount/note pair every record carries
pub(crate) fn validate_amount_and_note(
    amount: Money,
    note: &str,
) -> Result<(), RecordValidationError> {
    if !amount.is_positive() {
        return Err(RecordValidationError::NonPositiveAmount);
    }
    if !amount.is_valid_record_amount() {
        return Err(RecordValidationError::AmountTooLarge);
    }
    if note.trim().is_empty() {
        return Err(RecordValidationError::EmptyNote);
    }
    Ok(())
}

/// A single-month expenditure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub amount: Money,
    pub note: String,
    pub year: i32,
    pub month: Month,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Identifier the record had in an imported legacy `data.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

impl ExpenseRecord {
    /// Create a new expense for a month
    pub fn new(amount: Money, note: impl Into<String>, period: YearMonth) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            amount,
            note: note.into().trim().to_string(),
            year: period.year,
            month: period.month,
            created_at: now,
            updated_at: now,
            legacy_id: None,
        }
    }

    /// The month this expense is booked in
    pub fn period(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }

    /// Whether this expense is booked in the given month
    pub fn is_in(&self, period: &YearMonth) -> bool {
        self.year == period.year && self.month == period.month
    }

    /// Change amount and note; the month is part of the record's identity
    pub fn edit(&mut self, amount: Money, note: impl Into<String>) {
        self.amount = amount;
        self.note = note.into().trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_amount_and_note(self.amount, &self.note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_2025() -> YearMonth {
        YearMonth::new(2025, Month::March)
    }

    #[test]
    fn test_new_expense() {
        let expense = ExpenseRecord::new(Money::from_cents(5000), " groceries ", march_2025());

        assert_eq!(expense.note, "groceries");
        assert_eq!(expense.period(), march_2025());
        assert!(expense.is_in(&march_2025()));
        assert!(!expense.is_in(&YearMonth::new(2026, Month::March)));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let zero = ExpenseRecord::new(Money::zero(), "x", march_2025());
        assert_eq!(zero.validate(), Err(RecordValidationError::NonPositiveAmount));

        let negative = ExpenseRecord::new(Money::from_cents(-1), "x", march_2025());
        assert_eq!(
            negative.validate(),
            Err(RecordValidationError::NonPositiveAmount)
        );

        let blank = ExpenseRecord::new(Money::from_cents(100), "   ", march_2025());
        assert_eq!(blank.validate(), Err(RecordValidationError::EmptyNote));

        let huge = Money::parse("90000000000000000").unwrap();
        let too_large = ExpenseRecord::new(huge, "x", march_2025());
        assert_eq!(too_large.validate(), Err(RecordValidationError::AmountTooLarge));
        assert!(ExpenseRecord::new(Money::MAX, "x", march_2025()).validate().is_ok());
    }

    #[test]
    fn test_edit_keeps_identity_and_month() {
        let mut expense = ExpenseRecord::new(Money::from_cents(5000), "x", march_2025());
        let id = expense.id;

        expense.edit(Money::from_cents(7500), "y");

        assert_eq!(expense.id, id);
        assert_eq!(expense.amount.cents(), 7500);
        assert_eq!(expense.note, "y");
        assert_eq!(expense.period(), march_2025());
        assert!(expense.updated_at >= expense.created_at);
    }

    #[test]
    fn test_serialization_uses_canonical_month() {
        let expense = ExpenseRecord::new(Money::from_cents(5000), "x", march_2025());
        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(json["month"], "März");
        assert_eq!(json["year"], 2025);
        assert_eq!(json["amount"], 5000);

        let back: ExpenseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, expense);
    }
}
