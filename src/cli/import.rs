//! Legacy import CLI command

use std::path::Path;

use crate::error::MonthbookResult;
use crate::models::UserId;
use crate::services::ImportService;
use crate::storage::Storage;

/// Import a legacy `data.json`; with `only` set, just the selected user
pub fn handle_import_command(
    storage: &Storage,
    user: &UserId,
    file: &Path,
    only: bool,
) -> MonthbookResult<()> {
    let service = ImportService::new(storage);
    let report = service.import_file(file, only.then_some(user))?;

    if report.users.is_empty() {
        println!("Nothing to import from {}", file.display());
    }

    for result in &report.users {
        println!(
            "{}: {} expenses, {} recurring payments, {} income records imported",
            result.user, result.expenses, result.recurring, result.income
        );
        if result.duplicates > 0 {
            println!("  {} already imported earlier", result.duplicates);
        }
        for skipped in &result.skipped {
            println!(
                "  skipped {} {}: {}",
                skipped.collection, skipped.position, skipped.reason
            );
        }
    }

    for (raw, reason) in &report.rejected_users {
        println!("Ignored entry '{}': {}", raw, reason);
    }

    println!(
        "Imported {} records, skipped {}, {} already present",
        report.imported(),
        report.skipped(),
        report.duplicates()
    );
    Ok(())
}
