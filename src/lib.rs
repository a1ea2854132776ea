//! Monthbook - monthly household finance ledger for the terminal
//!
//! This library provides the core functionality of the `monthbook`
//! application. Each user keeps one-off expenses, recurring payments that
//! run over a range of months, and the income of each month. From these
//! records it computes the balance of a month and the expense totals of a
//! year.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (months, money, records, ledgers)
//! - `storage`: JSON file storage layer
//! - `reports`: Monthly balance and yearly expense series
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `export`: JSON and CSV export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use monthbook::config::{paths::MonthbookPaths, settings::Settings};
//! use monthbook::reports::MonthlyBalance;
//! use monthbook::storage::Storage;
//!
//! let paths = MonthbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let user = settings.resolve_user(None)?;
//! let ledger = storage.ledgers.snapshot(&user)?;
//! let balance = MonthlyBalance::compute(&ledger, "2025-03".parse()?);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{MonthbookError, MonthbookResult};

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "MONTHBOOK_LOG";

static TRACING: Once = Once::new();

/// Install the stderr tracing subscriber.
///
/// The filter comes from `MONTHBOOK_LOG` and defaults to `monthbook=warn`.
/// Calling this more than once is harmless.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("monthbook=warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
