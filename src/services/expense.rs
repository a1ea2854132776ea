//! Expense service
//!
//! Adds, edits and deletes one-off expenses of one user.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{MonthbookError, MonthbookResult};
use crate::models::{ExpenseRecord, Money, UserId, YearMonth};
use crate::reports::{sort_by_amount, MonthListing};
use crate::storage::Storage;

use super::single_match;

/// Service for one-off expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    user: &'a UserId,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service for one user
    pub fn new(storage: &'a Storage, user: &'a UserId) -> Self {
        Self { storage, user }
    }

    /// Book a new expense in `period`
    pub fn add(
        &self,
        period: YearMonth,
        amount: Money,
        note: &str,
    ) -> MonthbookResult<ExpenseRecord> {
        let expense = ExpenseRecord::new(amount, note, period);
        expense
            .validate()
            .map_err(|e| MonthbookError::Validation(e.to_string()))?;

        self.storage.ledgers.update(self.user, |ledger| {
            ledger.expenses.push(expense.clone());
            Ok(())
        })?;

        self.storage.log_create(
            self.user,
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.note.clone()),
            &expense,
        )?;

        info!(user = %self.user, id = %expense.id, period = %period.to_iso(), "expense added");
        Ok(expense)
    }

    /// Look up an expense by id or id prefix
    pub fn get(&self, reference: &str) -> MonthbookResult<ExpenseRecord> {
        let ledger = self.storage.ledgers.snapshot(self.user)?;
        let id = single_match(
            &ledger.resolve_expense(reference),
            reference,
            MonthbookError::expense_not_found,
        )?;
        ledger
            .expense(id)
            .cloned()
            .ok_or_else(|| MonthbookError::expense_not_found(reference))
    }

    /// Change amount and/or note; fields left as `None` keep their value
    pub fn edit(
        &self,
        reference: &str,
        amount: Option<Money>,
        note: Option<&str>,
    ) -> MonthbookResult<ExpenseRecord> {
        let (before, after) = self.storage.ledgers.update(self.user, |ledger| {
            let id = single_match(
                &ledger.resolve_expense(reference),
                reference,
                MonthbookError::expense_not_found,
            )?;
            let expense = ledger
                .expense_mut(id)
                .ok_or_else(|| MonthbookError::expense_not_found(reference))?;

            let before = expense.clone();
            let note = note.map(str::to_string).unwrap_or_else(|| before.note.clone());
            expense.edit(amount.unwrap_or(before.amount), note);
            expense
                .validate()
                .map_err(|e| MonthbookError::Validation(e.to_string()))?;

            Ok((before, expense.clone()))
        })?;

        self.storage.log_update(
            self.user,
            EntityType::Expense,
            after.id.to_string(),
            Some(after.note.clone()),
            &before,
            &after,
            None,
        )?;

        Ok(after)
    }

    /// Delete an expense
    pub fn delete(&self, reference: &str) -> MonthbookResult<ExpenseRecord> {
        let removed = self.storage.ledgers.update(self.user, |ledger| {
            let id = single_match(
                &ledger.resolve_expense(reference),
                reference,
                MonthbookError::expense_not_found,
            )?;
            ledger
                .remove_expense(id)
                .ok_or_else(|| MonthbookError::expense_not_found(reference))
        })?;

        self.storage.log_delete(
            self.user,
            EntityType::Expense,
            removed.id.to_string(),
            Some(removed.note.clone()),
            &removed,
        )?;

        info!(user = %self.user, id = %removed.id, "expense deleted");
        Ok(removed)
    }

    /// Expenses booked in `period`, cheapest first
    pub fn list_for_month(&self, period: YearMonth) -> MonthbookResult<Vec<ExpenseRecord>> {
        let ledger = self.storage.ledgers.snapshot(self.user)?;
        Ok(MonthListing::for_month(&ledger, period).expenses)
    }

    /// Every expense, by month and then by amount
    pub fn list_all(&self) -> MonthbookResult<Vec<ExpenseRecord>> {
        let mut expenses = self.storage.ledgers.snapshot(self.user)?.expenses;
        sort_by_amount(&mut expenses, |e| e.amount);
        expenses.sort_by_key(|e| e.period());
        Ok(expenses)
    }
}
