//! Expense CLI commands
//!
//! Implements CLI commands for one-off expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_table, DisplayOptions};
use crate::error::MonthbookResult;
use crate::models::UserId;
use crate::services::{ExpenseService, PeriodService};
use crate::storage::Storage;

use super::parse_amount;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Book a one-off expense
    Add {
        /// Amount (e.g., "12.50" or "12,50")
        amount: String,
        /// What the money was spent on
        note: String,
        /// Month to book it in (e.g., "2025-03", "März 2025", "last"); defaults to the current month
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Change the amount or note of an expense
    Edit {
        /// Expense ID or ID prefix
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID or ID prefix
        id: String,
    },
    /// List expenses of a month, cheapest first
    List {
        /// Month to list (defaults to the current month)
        #[arg(short, long)]
        period: Option<String>,
        /// List every expense instead of a single month
        #[arg(short, long, conflicts_with = "period")]
        all: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    user: &UserId,
    cmd: ExpenseCommands,
) -> MonthbookResult<()> {
    let service = ExpenseService::new(storage, user);
    let periods = PeriodService::new();
    let options = DisplayOptions::from_settings(settings);

    match cmd {
        ExpenseCommands::Add {
            amount,
            note,
            period,
        } => {
            let period = periods.parse_or_current(period.as_deref())?;
            let amount = parse_amount(&amount)?;

            let expense = service.add(period, amount, &note)?;

            println!(
                "Added expense {} of {} in {}: {}",
                expense.id,
                options.money(expense.amount),
                options.period(expense.period()),
                expense.note
            );
        }

        ExpenseCommands::Edit { id, amount, note } => {
            let amount = amount.as_deref().map(parse_amount).transpose()?;

            let expense = service.edit(&id, amount, note.as_deref())?;

            println!(
                "Updated expense {}: {} {}",
                expense.id,
                options.money(expense.amount),
                expense.note
            );
        }

        ExpenseCommands::Delete { id } => {
            let removed = service.delete(&id)?;
            println!(
                "Deleted expense {} ({} {})",
                removed.id,
                options.money(removed.amount),
                removed.note
            );
        }

        ExpenseCommands::List { period, all } => {
            if all {
                print!("{}", format_expense_table(&service.list_all()?, &options));
            } else {
                let period = periods.parse_or_current(period.as_deref())?;
                println!("Expenses for {}", options.period(period));
                print!(
                    "{}",
                    format_expense_table(&service.list_for_month(period)?, &options)
                );
            }
        }
    }

    Ok(())
}
