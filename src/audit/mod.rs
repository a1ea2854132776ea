//! Audit logging for Monthbook
//!
//! Every create, update and delete of an expense, recurring payment or
//! income record is appended to `audit.log` as one JSON line with the
//! record's before/after state.
//!
//! - `AuditEntry`: one logged operation.
//! - `AuditLogger`: appends and reads the JSONL file.
//! - `generate_diff`: one-line summary of what an edit changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, AuditSubject, EntityType, Operation};
pub use logger::AuditLogger;
