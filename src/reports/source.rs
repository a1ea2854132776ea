//! Read contract between the record store and the calculations

use crate::models::{ExpenseRecord, IncomeKey, IncomeRecord, Ledger, RecurringRecord};

/// Read-only access to one user's records
///
/// Calculations only ever read through this trait; selection, filtering and
/// sorting all happen on the calculation side.
pub trait RecordSource {
    /// Every one-off expense
    fn expenses(&self) -> &[ExpenseRecord];

    /// Every recurring payment
    fn recurring(&self) -> &[RecurringRecord];

    /// Income booked for a month, if any
    fn income(&self, key: &IncomeKey) -> Option<&IncomeRecord>;
}

impl RecordSource for Ledger {
    fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    fn recurring(&self) -> &[RecurringRecord] {
        &self.recurring
    }

    fn income(&self, key: &IncomeKey) -> Option<&IncomeRecord> {
        self.income.get(key)
    }
}
