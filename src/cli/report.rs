//! Report CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_month_summary, format_year_chart, DisplayOptions};
use crate::error::MonthbookResult;
use crate::models::UserId;
use crate::reports::{ExpenseSeries, MonthListing, MonthlyBalance};
use crate::services::PeriodService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses and balance of one month
    Month {
        /// Month to report (defaults to the current month)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Monthly expense totals of a year as a chart
    Year {
        /// Year to chart (defaults to the current year)
        #[arg(short, long)]
        year: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    user: &UserId,
    cmd: ReportCommands,
) -> MonthbookResult<()> {
    let periods = PeriodService::new();
    let options = DisplayOptions::from_settings(settings);
    let ledger = storage.ledgers.snapshot(user)?;

    match cmd {
        ReportCommands::Month { period } => {
            let period = periods.parse_or_current(period.as_deref())?;
            let balance = MonthlyBalance::compute(&ledger, period);
            let listing = MonthListing::for_month(&ledger, period);
            print!("{}", format_month_summary(&balance, &listing, &options));
        }

        ReportCommands::Year { year } => {
            let year = periods.parse_year_or_current(year.as_deref())?;
            let series = ExpenseSeries::compute(&ledger, year);
            print!("{}", format_year_chart(&series, &options));
        }
    }

    Ok(())
}
