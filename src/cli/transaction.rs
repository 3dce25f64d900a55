//! Transaction CLI commands

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date, parse_period};
use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{CashbookError, CashbookResult};
use crate::services::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Positive amount (e.g. "1200" or "1,200.50"); direction comes from the category
        amount: String,
        /// Category key (see `cashbook category list`)
        category: String,
        /// Free-text description
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, oldest first
    List {
        /// Filter by category key
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Show only the most recent N
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or `txn-xxxxxxxx`)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> CashbookResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let txn = service.create(CreateTransactionInput {
                date,
                description,
                category,
                amount: parse_amount(&amount)?,
            })?;

            println!("Recorded transaction {}", txn.id);
            println!("  {}", txn);
        }

        TransactionCommands::List {
            category,
            period,
            from,
            to,
            limit,
        } => {
            let mut filter = TransactionFilter::new()
                .date_range(
                    from.as_deref().map(parse_date).transpose()?,
                    to.as_deref().map(parse_date).transpose()?,
                )
                .limit(limit);
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(period) = period {
                filter = filter.period(parse_period(&period)?);
            }

            let transactions = service.list(filter)?;
            print!(
                "{}",
                format_transaction_register(&transactions, &settings.date_format, symbol)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.find(&id)?;
            print!(
                "{}",
                format_transaction_details(&txn, storage.classifications(), symbol)
            );
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            description,
            date,
        } => {
            let txn = service.find(&id)?;
            let input = UpdateTransactionInput {
                date: date.as_deref().map(parse_date).transpose()?,
                description,
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
            };

            if input.is_empty() {
                return Err(CashbookError::Validation(
                    "Nothing to change. Pass --amount, --category, --description or --date".into(),
                ));
            }

            let updated = service.update(txn.id, input)?;
            println!("Updated transaction {}", updated.id);
            println!("  {}", updated);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.find(&id)?;
            service.delete(txn.id)?;
            println!("Deleted transaction {}", txn.id);
        }
    }

    Ok(())
}
