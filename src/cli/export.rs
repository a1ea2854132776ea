//! Export CLI commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{MonthbookError, MonthbookResult};
use crate::export::{
    export_expenses_csv, export_income_csv, export_ledger_json, export_recurring_csv,
};
use crate::models::UserId;
use crate::storage::Storage;

/// Record kind written by `export csv`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CsvKind {
    Expenses,
    Recurring,
    Income,
}

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Full ledger as JSON
    Json {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// One record kind as CSV
    Csv {
        #[arg(value_enum)]
        kind: CsvKind,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&Path>) -> MonthbookResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                MonthbookError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Handle an export command
pub fn handle_export_command(
    storage: &Storage,
    user: &UserId,
    cmd: ExportCommands,
) -> MonthbookResult<()> {
    match cmd {
        ExportCommands::Json { output } => {
            let mut writer = open_output(output.as_deref())?;
            export_ledger_json(storage, user, &mut writer)?;
            writer.flush()?;
            if let Some(path) = output {
                eprintln!("Exported ledger of {} to {}", user, path.display());
            }
        }

        ExportCommands::Csv { kind, output } => {
            let mut writer = open_output(output.as_deref())?;
            let count = match kind {
                CsvKind::Expenses => export_expenses_csv(storage, user, &mut writer)?,
                CsvKind::Recurring => export_recurring_csv(storage, user, &mut writer)?,
                CsvKind::Income => export_income_csv(storage, user, &mut writer)?,
            };
            writer.flush()?;
            if let Some(path) = output {
                eprintln!("Exported {} records to {}", count, path.display());
            }
        }
    }

    Ok(())
}
