//! Income service
//!
//! Provides business logic for the single income record of each month.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{MonthbookError, MonthbookResult};
use crate::models::{IncomeKey, IncomeRecord, Money, UserId, YearMonth};
use crate::storage::Storage;

/// Service for per-month income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
    user: &'a UserId,
}

impl<'a> IncomeService<'a> {
    /// Create a new income service for one user
    pub fn new(storage: &'a Storage, user: &'a UserId) -> Self {
        Self { storage, user }
    }

    /// Set the income of a month, replacing any earlier value
    pub fn set(
        &self,
        period: YearMonth,
        amount: Money,
        notes: Option<String>,
    ) -> MonthbookResult<IncomeRecord> {
        let key = IncomeKey::from(period);

        let (before, after) = self.storage.ledgers.update(self.user, |ledger| {
            let before = ledger.income.get(&key).cloned();
            let mut record = before.clone().unwrap_or_else(|| IncomeRecord::new(amount));
            record.set_amount(amount);
            if let Some(n) = notes {
                record.set_notes(n);
            }

            record
                .validate()
                .map_err(|e| MonthbookError::Validation(e.to_string()))?;

            ledger.income.insert(key, record.clone());
            Ok((before, record))
        })?;

        let label = Some(format!("Income for {}", period));
        match &before {
            Some(previous) => self.storage.log_update(
                self.user,
                EntityType::Income,
                key.to_string(),
                label,
                previous,
                &after,
                Some(format!("{} -> {}", previous.amount, after.amount)),
            )?,
            None => self.storage.log_create(
                self.user,
                EntityType::Income,
                key.to_string(),
                label,
                &after,
            )?,
        }

        info!(user = %self.user, key = %key, "income set");
        Ok(after)
    }

    /// Income amount of a month, zero when none is recorded
    pub fn get_amount(&self, period: YearMonth) -> MonthbookResult<Money> {
        Ok(self
            .get(period)?
            .map(|record| record.amount)
            .unwrap_or_default())
    }

    /// Income record of a month
    pub fn get(&self, period: YearMonth) -> MonthbookResult<Option<IncomeRecord>> {
        let ledger = self.storage.ledgers.snapshot(self.user)?;
        Ok(ledger.income.get(&IncomeKey::from(period)).cloned())
    }

    /// Remove the income of a month
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn remove(&self, period: YearMonth) -> MonthbookResult<bool> {
        let key = IncomeKey::from(period);
        let removed = self
            .storage
            .ledgers
            .update(self.user, |ledger| Ok(ledger.income.remove(&key)))?;

        match removed {
            Some(record) => {
                self.storage.log_delete(
                    self.user,
                    EntityType::Income,
                    key.to_string(),
                    Some(format!("Income for {}", period)),
                    &record,
                )?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Every income record, oldest month first
    pub fn list(&self) -> MonthbookResult<Vec<(YearMonth, IncomeRecord)>> {
        let ledger = self.storage.ledgers.snapshot(self.user)?;
        Ok(ledger
            .income
            .into_iter()
            .map(|(key, record)| (key.period(), record))
            .collect())
    }
}
