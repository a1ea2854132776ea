//! Monthly Balance
//!
//! Income, one-off expenses and active recurring payments for a single
//! month, and the balance left over.

use tracing::debug;

use crate::models::{ExpenseRecord, IncomeKey, Money, RecurringRecord, YearMonth};

use super::source::RecordSource;

/// Totals for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyBalance {
    /// The month the totals are for
    pub period: YearMonth,
    /// Income booked for the month, zero when none is recorded
    pub income: Money,
    /// Sum of one-off expenses booked in the month
    pub one_time_total: Money,
    /// Sum of recurring payments active in the month
    pub recurring_total: Money,
    /// One-off plus recurring
    pub total_expenses: Money,
    /// Income minus total expenses; negative when overspent
    pub balance: Money,
}

impl MonthlyBalance {
    /// Compute the totals for `period`
    pub fn compute<S: RecordSource + ?Sized>(source: &S, period: YearMonth) -> Self {
        let income = source
            .income(&IncomeKey::from(period))
            .map(|record| record.amount)
            .unwrap_or_default();

        let one_time_total: Money = source
            .expenses()
            .iter()
            .filter(|e| e.is_in(&period))
            .map(|e| e.amount)
            .sum();

        let recurring_total: Money = source
            .recurring()
            .iter()
            .filter(|r| r.is_active_in(&period))
            .map(|r| r.amount)
            .sum();

        let total_expenses = one_time_total + recurring_total;
        let balance = income - total_expenses;

        debug!(
            period = %period.to_iso(),
            income = income.cents(),
            expenses = total_expenses.cents(),
            balance = balance.cents(),
            "monthly balance computed"
        );

        Self {
            period,
            income,
            one_time_total,
            recurring_total,
            total_expenses,
            balance,
        }
    }

    /// Share of income still left, as a percentage in `0..=100`
    ///
    /// Zero unless both income and balance are positive.
    pub fn balance_ratio(&self) -> f64 {
        if !self.income.is_positive() || !self.balance.is_positive() {
            return 0.0;
        }
        let ratio = self.balance.cents() as f64 / self.income.cents() as f64 * 100.0;
        ratio.min(100.0)
    }

    /// Whether expenses exceed income
    pub fn is_overspent(&self) -> bool {
        self.balance.is_negative()
    }
}

/// The records that make up one month, each list cheapest first
#[derive(Debug, Clone)]
pub struct MonthListing {
    pub period: YearMonth,
    pub expenses: Vec<ExpenseRecord>,
    pub recurring: Vec<RecurringRecord>,
}

impl MonthListing {
    /// Collect the one-off expenses and active recurring payments of `period`
    pub fn for_month<S: RecordSource + ?Sized>(source: &S, period: YearMonth) -> Self {
        let mut expenses: Vec<ExpenseRecord> = source
            .expenses()
            .iter()
            .filter(|e| e.is_in(&period))
            .cloned()
            .collect();
        sort_by_amount(&mut expenses, |e| e.amount);

        let mut recurring: Vec<RecurringRecord> = source
            .recurring()
            .iter()
            .filter(|r| r.is_active_in(&period))
            .cloned()
            .collect();
        sort_by_amount(&mut recurring, |r| r.amount);

        Self {
            period,
            expenses,
            recurring,
        }
    }

    /// True when nothing is booked in the month
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.recurring.is_empty()
    }
}

/// Sort ascending by amount; records with equal amounts keep their order
pub fn sort_by_amount<T>(records: &mut [T], amount: impl Fn(&T) -> Money) {
    records.sort_by_key(|record| amount(record));
}
