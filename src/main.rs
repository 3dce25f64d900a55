use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cashbook::cli::{
    handle_category_command, handle_export_command, handle_history_command,
    handle_import_command, handle_report_command, handle_transaction_command, CategoryCommands,
    ExportCommands, ReportCommands, TransactionCommands,
};
use cashbook::config::{paths::CashbookPaths, settings::Settings};
use cashbook::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "cashbook",
    version,
    about = "Cash-basis bookkeeping with derived financial statements",
    long_about = "Cashbook records a small business's cash transactions against a \
                  category classification table and derives the statement of profit \
                  or loss, the statement of financial position, the statement of cash \
                  flows, health ratios and a monthly trend from them."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and an editable classification table
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Category classification commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Financial statements and ratios
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export the ledger
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import a JSON or YAML export
    Import {
        file: PathBuf,
        /// Replace all existing transactions instead of merging
        #[arg(long)]
        replace: bool,
    },

    /// Show recent changes from the audit log
    History {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = CashbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Cashbook at: {}", paths.base_dir().display());
            let seeded = initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            if seeded {
                println!();
                println!(
                    "The standard classification table was written to {}",
                    paths.classifications_file().display()
                );
                println!("Edit it to rename accounts or add categories.");
            }
            println!();
            println!("Run 'cashbook category list' to see all categories.");
        }
        Some(Commands::Config) => {
            println!("Cashbook Configuration");
            println!("======================");
            println!("Base directory:      {}", paths.base_dir().display());
            println!("Transactions:        {}", paths.transactions_file().display());
            println!("Classifications:     {}", paths.classifications_file().display());
            println!("Audit log:           {}", paths.audit_log().display());
            println!("Initialized:         {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Trend chart:       {}", settings.show_trend_chart);
        }
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Import { file, replace }) => {
            handle_import_command(&storage, &file, replace)?
        }
        Some(Commands::History { limit }) => handle_history_command(&storage, limit)?,
        None => {
            println!("Cashbook - cash-basis bookkeeping");
            println!();
            println!("Run 'cashbook --help' for usage information.");
            println!("Run 'cashbook init' to get started.");
        }
    }

    Ok(())
}
