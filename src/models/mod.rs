//! Core data models for Monthbook
//!
//! This module contains the data structures of the monthly finance domain:
//! months and their ordinal encoding, money, one-off expenses, recurring
//! payments, monthly income and the per-user ledger that holds them.

pub mod expense;
pub mod ids;
pub mod income;
pub mod ledger;
pub mod money;
pub mod month;
pub mod recurring;

pub use expense::{ExpenseRecord, RecordValidationError};
pub use ids::{ExpenseId, RecurringId, UserId, UserIdError};
pub use income::{IncomeKey, IncomeRecord, IncomeValidationError};
pub use ledger::Ledger;
pub use money::{Money, MoneyParseError};
pub use month::{ordinal, Month, MonthRange, PeriodParseError, YearMonth};
pub use recurring::RecurringRecord;
