//! Append-only audit log
//!
//! Each entry is one JSON line, flushed as soon as it is written.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::{MonthbookError, MonthbookResult};

use super::entry::AuditEntry;

/// Writes and reads the JSONL audit log
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a logger writing to `log_path`
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> MonthbookResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| MonthbookError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| MonthbookError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| MonthbookError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| MonthbookError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    ///
    /// Lines that fail to parse are skipped with a warning so one damaged
    /// line does not hide the rest of the history.
    pub fn read_all(&self) -> MonthbookResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| MonthbookError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                MonthbookError::Io(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(line = line_num + 1, error = %e, "skipping unreadable audit entry"),
            }
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries, optionally for one user only
    pub fn read_recent(&self, count: usize, user: Option<&str>) -> MonthbookResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        if let Some(user) = user {
            entries.retain(|e| e.user == user);
        }
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Path of the log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{AuditSubject, EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(user: &str, id: &str) -> AuditEntry {
        AuditEntry::create(
            AuditSubject::new(user, EntityType::Expense, id, None),
            &json!({"amount": 100}),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = logger();
        logger.log(&entry("alice", "exp-1")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Expense);
    }

    #[test]
    fn test_missing_log_is_empty() {
        let (logger, _temp) = logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_recent_filters_by_user() {
        let (logger, _temp) = logger();
        for i in 0..5 {
            logger.log(&entry("alice", &format!("exp-{}", i))).unwrap();
            logger.log(&entry("bob", &format!("exp-b{}", i))).unwrap();
        }

        let recent = logger.read_recent(2, Some("alice")).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].entity_id, "exp-3");
        assert_eq!(recent[1].entity_id, "exp-4");

        assert_eq!(logger.read_recent(100, None).unwrap().len(), 10);
    }

    #[test]
    fn test_damaged_line_skipped() {
        let (logger, _temp) = logger();
        logger.log(&entry("alice", "exp-1")).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"{broken\n")
            .unwrap();
        logger.log(&entry("alice", "exp-2")).unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 2);
    }
}
