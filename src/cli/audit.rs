//! Audit log CLI command

use crate::error::MonthbookResult;
use crate::models::UserId;
use crate::storage::Storage;

/// Show the most recent audit entries
pub fn handle_audit_command(
    storage: &Storage,
    user: &UserId,
    limit: usize,
    all_users: bool,
) -> MonthbookResult<()> {
    let filter = (!all_users).then_some(user.as_str());
    let entries = storage.audit().read_recent(limit, filter)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
