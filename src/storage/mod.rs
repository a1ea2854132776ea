//! Storage layer for Monthbook
//!
//! Provides JSON file storage with atomic writes, a single lock around each
//! read-modify-write, and the audit trail for every mutation.

pub mod file_io;
pub mod init;
pub mod ledgers;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use ledgers::LedgerStore;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, AuditSubject, EntityType};
use crate::config::paths::MonthbookPaths;
use crate::error::MonthbookResult;
use crate::models::UserId;

/// Main storage coordinator: ledger repository plus audit log
pub struct Storage {
    paths: MonthbookPaths,
    pub ledgers: LedgerStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MonthbookPaths) -> MonthbookResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            ledgers: LedgerStore::new(paths.ledgers_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &MonthbookPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> MonthbookResult<()> {
        self.ledgers.load()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// The audit log
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record the creation of a record
    pub fn log_create<T: Serialize>(
        &self,
        user: &UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> MonthbookResult<()> {
        let subject = AuditSubject::new(user.as_str(), entity_type, entity_id, entity_name);
        self.audit.log(&AuditEntry::create(subject, entity))
    }

    /// Record an edit; without an explicit summary the JSON diff is used
    #[allow(clippy::too_many_arguments)]
    pub fn log_update<T: Serialize>(
        &self,
        user: &UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> MonthbookResult<()> {
        let diff_summary = match diff_summary {
            Some(summary) => Some(summary),
            None => generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(after)?),
        };
        let subject = AuditSubject::new(user.as_str(), entity_type, entity_id, entity_name);
        self.audit
            .log(&AuditEntry::update(subject, before, after, diff_summary))
    }

    /// Record the deletion of a record
    pub fn log_delete<T: Serialize>(
        &self,
        user: &UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> MonthbookResult<()> {
        let subject = AuditSubject::new(user.as_str(), entity_type, entity_id, entity_name);
        self.audit.log(&AuditEntry::delete(subject, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MonthbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_log_update_computes_diff() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MonthbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let user = UserId::new("alice").unwrap();

        storage
            .log_update(
                &user,
                EntityType::Expense,
                "exp-1",
                None,
                &json!({"amount": 100}),
                &json!({"amount": 250}),
                None,
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].user, "alice");
        assert_eq!(entries[0].diff_summary.as_deref(), Some("amount: 100 -> 250"));
    }
}
