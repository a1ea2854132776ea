//! Recurring payment CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_recurring_table, DisplayOptions};
use crate::error::MonthbookResult;
use crate::models::UserId;
use crate::services::recurring::RecurringChanges;
use crate::services::{PeriodService, RecurringService};
use crate::storage::Storage;

use super::parse_amount;

/// Recurring payment subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Add a payment charged every month of a range
    Add {
        /// Monthly amount
        amount: String,
        /// What the payment is for
        note: String,
        /// First month charged (e.g., "2025-01", "Januar 2025")
        #[arg(short, long)]
        start: String,
        /// Last month charged, inclusive
        #[arg(short, long)]
        end: String,
    },
    /// Edit a recurring payment
    Edit {
        /// Recurring payment ID or ID prefix
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Delete a recurring payment
    Delete {
        /// Recurring payment ID or ID prefix
        id: String,
    },
    /// List recurring payments
    List {
        /// Only payments active in this month
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a recurring payment command
pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    user: &UserId,
    cmd: RecurringCommands,
) -> MonthbookResult<()> {
    let service = RecurringService::new(storage, user);
    let periods = PeriodService::new();
    let options = DisplayOptions::from_settings(settings);

    match cmd {
        RecurringCommands::Add {
            amount,
            note,
            start,
            end,
        } => {
            let amount = parse_amount(&amount)?;
            let start = periods.parse(&start)?;
            let end = periods.parse(&end)?;

            let payment = service.add(amount, &note, start, end)?;

            println!(
                "Added recurring payment {} of {} per month, {} through {} ({} months)",
                payment.id,
                options.money(payment.amount),
                options.period(payment.start),
                options.period(payment.end),
                payment.month_count()
            );
        }

        RecurringCommands::Edit {
            id,
            amount,
            note,
            start,
            end,
        } => {
            let changes = RecurringChanges {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                note,
                start: start.as_deref().map(|s| periods.parse(s)).transpose()?,
                end: end.as_deref().map(|s| periods.parse(s)).transpose()?,
            };

            let payment = service.edit(&id, changes)?;

            println!(
                "Updated recurring payment {}: {} per month, {} through {}",
                payment.id,
                options.money(payment.amount),
                options.period(payment.start),
                options.period(payment.end)
            );
        }

        RecurringCommands::Delete { id } => {
            let removed = service.delete(&id)?;
            println!("Deleted recurring payment {} ({})", removed.id, removed.note);
        }

        RecurringCommands::List { period } => {
            let payments = match period {
                Some(p) => {
                    let period = periods.parse(&p)?;
                    println!("Recurring payments active in {}", options.period(period));
                    service.list_active(period)?
                }
                None => service.list_all()?,
            };
            print!("{}", format_recurring_table(&payments, &options));
        }
    }

    Ok(())
}
