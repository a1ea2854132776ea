//! Service layer for Monthbook
//!
//! The service layer sits between the CLI and storage: it validates input,
//! runs every change through the ledger store's atomic update and records
//! the change in the audit log.

pub mod expense;
pub mod import;
pub mod income;
pub mod period;
pub mod recurring;

pub use expense::ExpenseService;
pub use import::{ImportReport, ImportService, SkippedRecord, UserImport};
pub use income::IncomeService;
pub use period::PeriodService;
pub use recurring::RecurringService;

use crate::error::{MonthbookError, MonthbookResult};

/// Narrow the ids matching a user-typed reference down to exactly one
pub(crate) fn single_match<I: Copy>(
    matches: &[I],
    reference: &str,
    not_found: fn(String) -> MonthbookError,
) -> MonthbookResult<I> {
    match matches {
        [id] => Ok(*id),
        [] => Err(not_found(reference.to_string())),
        _ => Err(MonthbookError::Validation(format!(
            "'{}' matches {} records, use a longer id",
            reference,
            matches.len()
        ))),
    }
}
