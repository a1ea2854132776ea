//! JSON Export functionality
//!
//! Exports one user's complete ledger with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MonthbookError, MonthbookResult};
use crate::models::{Ledger, UserId, YearMonth};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub user: UserId,

    pub ledger: Ledger,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub recurring_count: usize,
    pub income_count: usize,

    /// First month touched by any record
    pub earliest_month: Option<YearMonth>,

    /// Last month touched by any record
    pub latest_month: Option<YearMonth>,
}

impl ExportMetadata {
    fn describe(ledger: &Ledger) -> Self {
        let months = ledger
            .expenses
            .iter()
            .map(|e| e.period())
            .chain(ledger.recurring.iter().flat_map(|r| [r.start, r.end]))
            .chain(ledger.income.keys().map(|k| k.period()));

        let (earliest, latest) = months.fold((None, None), |(min, max), p| {
            (
                Some(min.map_or(p, |m: YearMonth| m.min(p))),
                Some(max.map_or(p, |m: YearMonth| m.max(p))),
            )
        });

        Self {
            expense_count: ledger.expenses.len(),
            recurring_count: ledger.recurring.len(),
            income_count: ledger.income.len(),
            earliest_month: earliest,
            latest_month: latest,
        }
    }
}

impl LedgerExport {
    /// Snapshot a user's ledger for export
    pub fn from_storage(storage: &Storage, user: &UserId) -> MonthbookResult<Self> {
        let ledger = storage.ledgers.snapshot(user)?;

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user: user.clone(),
            metadata: ExportMetadata::describe(&ledger),
            ledger,
        })
    }
}

/// Export a user's ledger as pretty-printed JSON
pub fn export_ledger_json<W: Write>(
    storage: &Storage,
    user: &UserId,
    writer: &mut W,
) -> MonthbookResult<()> {
    let export = LedgerExport::from_storage(storage, user)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| MonthbookError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| MonthbookError::Export(e.to_string()))?;
    Ok(())
}
