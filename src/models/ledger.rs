//! Per-user ledger document
//!
//! One user's three collections, persisted together: expenses and
//! recurring payments as ordered lists, income as a map keyed by month.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::expense::ExpenseRecord;
use super::ids::{ExpenseId, RecurringId};
use super::income::{IncomeKey, IncomeRecord};
use super::recurring::RecurringRecord;

/// All records belonging to one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub recurring: Vec<RecurringRecord>,
    #[serde(default)]
    pub income: BTreeMap<IncomeKey, IncomeRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the ledger holds no records at all
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.recurring.is_empty() && self.income.is_empty()
    }

    /// Find an expense by id
    pub fn expense(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Find a mutable expense by id
    pub fn expense_mut(&mut self, id: ExpenseId) -> Option<&mut ExpenseRecord> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }

    /// Remove an expense, returning it if it existed
    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<ExpenseRecord> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        Some(self.expenses.remove(index))
    }

    /// Find a recurring payment by id
    pub fn recurring_payment(&self, id: RecurringId) -> Option<&RecurringRecord> {
        self.recurring.iter().find(|r| r.id == id)
    }

    /// Find a mutable recurring payment by id
    pub fn recurring_payment_mut(&mut self, id: RecurringId) -> Option<&mut RecurringRecord> {
        self.recurring.iter_mut().find(|r| r.id == id)
    }

    /// Remove a recurring payment, returning it if it existed
    pub fn remove_recurring(&mut self, id: RecurringId) -> Option<RecurringRecord> {
        let index = self.recurring.iter().position(|r| r.id == id)?;
        Some(self.recurring.remove(index))
    }

    /// Resolve a user-typed expense reference (short id or UUID prefix)
    pub fn resolve_expense(&self, reference: &str) -> Vec<ExpenseId> {
        self.expenses
            .iter()
            .filter(|e| e.id.matches(reference))
            .map(|e| e.id)
            .collect()
    }

    /// Resolve a user-typed recurring payment reference
    pub fn resolve_recurring(&self, reference: &str) -> Vec<RecurringId> {
        self.recurring
            .iter()
            .filter(|r| r.id.matches(reference))
            .map(|r| r.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month, YearMonth};

    #[test]
    fn test_empty_ledger_serialization() {
        let json = serde_json::to_string(&Ledger::new()).unwrap();
        assert_eq!(json, r#"{"expenses":[],"recurring":[],"income":{}}"#);

        let parsed: Ledger = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_remove_and_lookup() {
        let mut ledger = Ledger::new();
        let period = YearMonth::new(2025, Month::March);
        let first = ExpenseRecord::new(Money::from_cents(100), "a", period);
        let second = ExpenseRecord::new(Money::from_cents(200), "b", period);
        let first_id = first.id;
        ledger.expenses.push(first);
        ledger.expenses.push(second);

        assert!(ledger.expense(first_id).is_some());
        let removed = ledger.remove_expense(first_id).unwrap();
        assert_eq!(removed.note, "a");
        assert!(ledger.expense(first_id).is_none());
        assert_eq!(ledger.expenses.len(), 1);
        assert!(ledger.remove_expense(first_id).is_none());
    }

    #[test]
    fn test_resolve_reference() {
        let mut ledger = Ledger::new();
        let period = YearMonth::new(2025, Month::March);
        let rec = RecurringRecord::new(Money::from_cents(100), "a", period, period);
        let id = rec.id;
        ledger.recurring.push(rec);

        assert_eq!(ledger.resolve_recurring(&id.to_string()), vec![id]);
        assert!(ledger.resolve_recurring("rec-zzzzzzzz").is_empty());
    }
}
