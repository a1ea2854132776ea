//! Expense Series
//!
//! Twelve monthly expense totals for one calendar year, used by the year
//! chart.

use tracing::debug;

use crate::models::{Money, Month, YearMonth};

use super::source::RecordSource;

/// Total expenses (one-off plus recurring) per month of a year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseSeries {
    pub year: i32,
    /// Index 0 is January, 11 is December
    pub totals: [Money; 12],
}

impl ExpenseSeries {
    /// Compute the series for `year`
    pub fn compute<S: RecordSource + ?Sized>(source: &S, year: i32) -> Self {
        let mut totals = [Money::zero(); 12];

        for expense in source.expenses().iter().filter(|e| e.year == year) {
            totals[expense.month.index()] += expense.amount;
        }

        for payment in source.recurring() {
            // Ranges that end before or start after the year add nothing
            if payment.end.year < year || payment.start.year > year {
                continue;
            }
            for period in payment.months().filter(|p| p.year == year) {
                totals[period.month.index()] += payment.amount;
            }
        }

        debug!(year, "expense series computed");
        Self { year, totals }
    }

    /// Total for one month
    pub fn get(&self, month: Month) -> Money {
        self.totals[month.index()]
    }

    /// Sum over the whole year
    pub fn total(&self) -> Money {
        self.totals.iter().sum()
    }

    /// The largest monthly total, zero for an empty year
    pub fn max(&self) -> Money {
        self.totals.iter().copied().max().unwrap_or_default()
    }

    /// Iterate `(month, total)` pairs in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (YearMonth, Money)> + '_ {
        Month::ALL
            .iter()
            .zip(self.totals.iter())
            .map(move |(month, total)| (YearMonth::new(self.year, *month), *total))
    }
}
