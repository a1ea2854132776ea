//! Export module for Monthbook
//!
//! Exports one user's data:
//! - CSV: expenses, recurring payments or income (spreadsheet-compatible)
//! - JSON: the full ledger with schema version and metadata

pub mod csv;
pub mod json;

pub use self::csv::{export_expenses_csv, export_income_csv, export_recurring_csv};
pub use json::{export_ledger_json, LedgerExport, EXPORT_SCHEMA_VERSION};
