//! Recurring payment service
//!
//! Provides business logic for payments charged every month of a range.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{MonthbookError, MonthbookResult};
use crate::models::{Money, RecurringRecord, UserId, YearMonth};
use crate::reports::MonthListing;
use crate::storage::Storage;

use super::single_match;

/// Changes to apply to a recurring payment; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct RecurringChanges {
    pub amount: Option<Money>,
    pub note: Option<String>,
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
}

/// Service for recurring payment management
pub struct RecurringService<'a> {
    storage: &'a Storage,
    user: &'a UserId,
}

impl<'a> RecurringService<'a> {
    /// Create a new recurring payment service for one user
    pub fn new(storage: &'a Storage, user: &'a UserId) -> Self {
        Self { storage, user }
    }

    /// Add a payment charged every month from `start` through `end`
    pub fn add(
        &self,
        amount: Money,
        note: &str,
        start: YearMonth,
        end: YearMonth,
    ) -> MonthbookResult<RecurringRecord> {
        let payment = RecurringRecord::new(amount, note, start, end);
        payment
            .validate()
            .map_err(|e| MonthbookError::Validation(e.to_string()))?;

        self.storage.ledgers.update(self.user, |ledger| {
            ledger.recurring.push(payment.clone());
            Ok(())
        })?;

        self.storage.log_create(
            self.user,
            EntityType::Recurring,
            payment.id.to_string(),
            Some(payment.note.clone()),
            &payment,
        )?;

        info!(
            user = %self.user,
            id = %payment.id,
            months = payment.month_count(),
            "recurring payment added"
        );
        Ok(payment)
    }

    /// Look up a recurring payment by id or id prefix
    pub fn get(&self, reference: &str) -> MonthbookResult<RecurringRecord> {
        let ledger = self.storage.ledgers.snapshot(self.user)?;
        let id = single_match(
            &ledger.resolve_recurring(reference),
            reference,
            MonthbookError::recurring_not_found,
        )?;
        ledger
            .recurring_payment(id)
            .cloned()
            .ok_or_else(|| MonthbookError::recurring_not_found(reference))
    }

    /// Edit a payment; the range is checked again after the change
    pub fn edit(
        &self,
        reference: &str,
        changes: RecurringChanges,
    ) -> MonthbookResult<RecurringRecord> {
        let (before, after) = self.storage.ledgers.update(self.user, |ledger| {
            let id = single_match(
                &ledger.resolve_recurring(reference),
                reference,
                MonthbookError::recurring_not_found,
            )?;
            let payment = ledger
                .recurring_payment_mut(id)
                .ok_or_else(|| MonthbookError::recurring_not_found(reference))?;

            let before = payment.clone();
            payment.edit(
                changes.amount.unwrap_or(before.amount),
                changes.note.unwrap_or_else(|| before.note.clone()),
                changes.start.unwrap_or(before.start),
                changes.end.unwrap_or(before.end),
            );
            payment
                .validate()
                .map_err(|e| MonthbookError::Validation(e.to_string()))?;

            Ok((before, payment.clone()))
        })?;

        self.storage.log_update(
            self.user,
            EntityType::Recurring,
            after.id.to_string(),
            Some(after.note.clone()),
            &before,
            &after,
            None,
        )?;

        Ok(after)
    }

    /// Delete a recurring payment
    pub fn delete(&self, reference: &str) -> MonthbookResult<RecurringRecord> {
        let removed = self.storage.ledgers.update(self.user, |ledger| {
            let id = single_match(
                &ledger.resolve_recurring(reference),
                reference,
                MonthbookError::recurring_not_found,
            )?;
            ledger
                .remove_recurring(id)
                .ok_or_else(|| MonthbookError::recurring_not_found(reference))
        })?;

        self.storage.log_delete(
            self.user,
            EntityType::Recurring,
            removed.id.to_string(),
            Some(removed.note.clone()),
            &removed,
        )?;

        info!(user = %self.user, id = %removed.id, "recurring payment deleted");
        Ok(removed)
    }

    /// Payments charged in `period`, cheapest first
    pub fn list_active(&self, period: YearMonth) -> MonthbookResult<Vec<RecurringRecord>> {
        let ledger = self.storage.ledgers.snapshot(self.user)?;
        Ok(MonthListing::for_month(&ledger, period).recurring)
    }

    /// Every recurring payment, by start month
    pub fn list_all(&self) -> MonthbookResult<Vec<RecurringRecord>> {
        let mut payments = self.storage.ledgers.snapshot(self.user)?.recurring;
        payments.sort_by_key(|p| p.start);
        Ok(payments)
    }
}
