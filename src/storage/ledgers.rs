//! Ledger repository for JSON storage
//!
//! Every user's ledger lives in one document (`ledgers.json`), keyed by user
//! id. Writes are read-modify-write under a single lock: the closure edits a
//! copy, the whole document is written atomically, and only then does the
//! copy replace the in-memory ledger.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::error::{MonthbookError, MonthbookResult};
use crate::models::{Ledger, UserId};

use super::file_io::{read_json, write_json_atomic};

type LedgerMap = BTreeMap<UserId, Ledger>;

fn lock_err(e: impl std::fmt::Display) -> MonthbookError {
    MonthbookError::Storage(format!("Failed to acquire ledger lock: {}", e))
}

/// Repository holding every user's ledger
pub struct LedgerStore {
    path: PathBuf,
    ledgers: RwLock<LedgerMap>,
}

impl LedgerStore {
    /// Create a new repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ledgers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Path of the backing document
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load all ledgers from disk, replacing what is in memory
    pub fn load(&self) -> MonthbookResult<()> {
        let document: LedgerMap = read_json(&self.path)?;
        let mut ledgers = self.ledgers.write().map_err(lock_err)?;
        debug!(users = document.len(), "ledgers loaded");
        *ledgers = document;
        Ok(())
    }

    /// Fresh copy of a user's ledger; unknown users get an empty ledger
    pub fn snapshot(&self, user: &UserId) -> MonthbookResult<Ledger> {
        let ledgers = self.ledgers.read().map_err(lock_err)?;
        Ok(ledgers.get(user).cloned().unwrap_or_default())
    }

    /// Users that have a stored ledger
    pub fn users(&self) -> MonthbookResult<Vec<UserId>> {
        let ledgers = self.ledgers.read().map_err(lock_err)?;
        Ok(ledgers.keys().cloned().collect())
    }

    /// Apply a change to one user's ledger and persist it
    ///
    /// The closure works on a copy. If it returns an error, or writing the
    /// document fails, neither memory nor disk change.
    pub fn update<T, F>(&self, user: &UserId, change: F) -> MonthbookResult<T>
    where
        F: FnOnce(&mut Ledger) -> MonthbookResult<T>,
    {
        let mut ledgers = self.ledgers.write().map_err(lock_err)?;

        let mut candidate = ledgers.get(user).cloned().unwrap_or_default();
        let output = change(&mut candidate)?;

        let previous = ledgers.insert(user.clone(), candidate);
        if let Err(e) = write_json_atomic(&self.path, &*ledgers) {
            warn!(user = %user, error = %e, "ledger write failed, rolling back");
            match previous {
                Some(ledger) => {
                    ledgers.insert(user.clone(), ledger);
                }
                None => {
                    ledgers.remove(user);
                }
            }
            return Err(e);
        }

        debug!(user = %user, "ledger updated");
        Ok(output)
    }
}
