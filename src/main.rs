use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use monthbook::cli::{
    handle_audit_command, handle_expense_command, handle_export_command, handle_import_command,
    handle_income_command, handle_recurring_command, handle_report_command,
};
use monthbook::config::{paths::MonthbookPaths, settings::Settings};
use monthbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "monthbook",
    version,
    about = "Monthly household finance ledger",
    long_about = "Monthbook records one-off expenses, recurring payments and the \
                  income of each month, and shows what is left at the end of it."
)]
struct Cli {
    /// Ledger to work on (defaults to the configured default user)
    #[arg(short, long, global = true, env = "MONTHBOOK_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// One-off expense commands
    #[command(subcommand, alias = "exp")]
    Expense(monthbook::cli::ExpenseCommands),

    /// Recurring payment commands
    #[command(subcommand, alias = "rec")]
    Recurring(monthbook::cli::RecurringCommands),

    /// Monthly income commands
    #[command(subcommand)]
    Income(monthbook::cli::IncomeCommands),

    /// Balance and expense reports
    #[command(subcommand)]
    Report(monthbook::cli::ReportCommands),

    /// Export a ledger
    #[command(subcommand)]
    Export(monthbook::cli::ExportCommands),

    /// Import a data.json file from the earlier web application
    Import {
        /// Path to data.json
        file: PathBuf,
        /// Only import the records of the selected user
        #[arg(long)]
        only: bool,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
        /// Include entries of every user
        #[arg(long)]
        all_users: bool,
    },
}

fn main() -> Result<()> {
    monthbook::init_tracing();

    let cli = Cli::parse();

    let paths = MonthbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let user = settings.resolve_user(cli.user.as_deref())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Monthbook at: {}", paths.base_dir().display());
            monthbook::storage::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'monthbook income set <amount>' to record this month's income,");
            println!("then 'monthbook expense add <amount> <note>' to book expenses.");
        }
        Some(Commands::Config) => {
            println!("Monthbook Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Ledger file:     {}", paths.ledgers_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Month names:     {:?}", settings.month_names);
            println!("  Default user:    {}", settings.default_user);
            println!("  Chart width:     {}", settings.chart_width);
            println!();
            println!("Active user: {}", user);
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Recurring(cmd)) => {
            handle_recurring_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &user, cmd)?;
        }
        Some(Commands::Import { file, only }) => {
            handle_import_command(&storage, &user, &file, only)?;
        }
        Some(Commands::Audit { limit, all_users }) => {
            handle_audit_command(&storage, &user, limit, all_users)?;
        }
        None => {
            println!("Monthbook - monthly household finance ledger");
            println!();
            println!("Run 'monthbook --help' for usage information.");
        }
    }

    Ok(())
}
