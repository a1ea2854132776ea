//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod expense;
pub mod export;
pub mod import;
pub mod income;
pub mod recurring;
pub mod report;

pub use audit::handle_audit_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::handle_import_command;
pub use income::{handle_income_command, IncomeCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_report_command, ReportCommands};

use crate::error::{MonthbookError, MonthbookResult};
use crate::models::Money;

/// Parse an amount typed on the command line
pub(crate) fn parse_amount(input: &str) -> MonthbookResult<Money> {
    Money::parse(input).map_err(|e| {
        MonthbookError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50' or '12,50'. Error: {}",
            input, e
        ))
    })
}
