//! Display formatting for terminal output
//!
//! Turns records and report results into text: record tables, the month
//! summary and the year chart. Currency symbol and month name language come
//! from the user's settings.

pub mod records;
pub mod report;

pub use records::{format_expense_table, format_income_table, format_recurring_table};
pub use report::{format_bar, format_month_summary, format_year_chart, separator, truncate};

use crate::config::{MonthNames, Settings};
use crate::models::{Money, Month, YearMonth};

/// Presentation preferences taken from the settings
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub month_names: MonthNames,
    pub chart_width: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl DisplayOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            month_names: settings.month_names,
            chart_width: settings.chart_width,
        }
    }

    /// `€12.50`, `-€3.00`
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    pub fn month(&self, month: Month) -> &'static str {
        self.month_names.name(month)
    }

    /// `März 2025` or `March 2025`
    pub fn period(&self, period: YearMonth) -> String {
        format!("{} {}", self.month(period.month), period.year)
    }
}
