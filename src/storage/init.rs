//! Storage initialization
//!
//! Handles first-run setup: directories, settings file and an empty ledger
//! document.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::paths::MonthbookPaths;
use crate::config::settings::Settings;
use crate::error::MonthbookResult;
use crate::models::{Ledger, UserId};

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left alone, so running this twice is harmless.
pub fn initialize_storage(paths: &MonthbookPaths) -> MonthbookResult<Settings> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
        info!(path = %paths.settings_file().display(), "wrote default settings");
    }

    if !paths.ledgers_file().exists() {
        let empty: BTreeMap<UserId, Ledger> = BTreeMap::new();
        write_json_atomic(paths.ledgers_file(), &empty)?;
        info!(path = %paths.ledgers_file().display(), "created empty ledger document");
    }

    Ok(settings)
}
