//! Income CLI commands
//!
//! Implements CLI commands for the income of each month.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_income_table, DisplayOptions};
use crate::error::MonthbookResult;
use crate::models::UserId;
use crate::services::{IncomeService, PeriodService};
use crate::storage::Storage;

use super::parse_amount;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Set the income of a month, replacing any earlier value
    Set {
        /// Income amount (e.g., "2500" or "2500.00")
        amount: String,

        /// Month (e.g., "2025-01" for January 2025); defaults to the current month
        #[arg(short, long)]
        period: Option<String>,

        /// Notes about this income
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Show the income of a month
    Show {
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Remove the income of a month
    Remove {
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List all recorded income
    List,
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    user: &UserId,
    cmd: IncomeCommands,
) -> MonthbookResult<()> {
    let service = IncomeService::new(storage, user);
    let periods = PeriodService::new();
    let options = DisplayOptions::from_settings(settings);

    match cmd {
        IncomeCommands::Set {
            amount,
            period,
            notes,
        } => {
            let period = periods.parse_or_current(period.as_deref())?;
            let amount = parse_amount(&amount)?;

            let record = service.set(period, amount, notes)?;

            println!(
                "Set income for {} to {}",
                options.period(period),
                options.money(record.amount)
            );
        }

        IncomeCommands::Show { period } => {
            let period = periods.parse_or_current(period.as_deref())?;

            match service.get(period)? {
                Some(record) => {
                    println!("Income for {}", options.period(period));
                    println!("{}", "-".repeat(40));
                    println!("Amount: {}", options.money(record.amount));
                    if !record.notes.is_empty() {
                        println!("Notes:  {}", record.notes);
                    }
                }
                None => {
                    println!("No income set for {}", options.period(period));
                    println!("Use 'monthbook income set <amount>' to set it.");
                }
            }
        }

        IncomeCommands::Remove { period } => {
            let period = periods.parse_or_current(period.as_deref())?;

            if service.remove(period)? {
                println!("Removed income for {}", options.period(period));
            } else {
                println!("No income was set for {}", options.period(period));
            }
        }

        IncomeCommands::List => {
            print!("{}", format_income_table(&service.list()?, &options));
        }
    }

    Ok(())
}
