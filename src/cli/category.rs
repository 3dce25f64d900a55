//! Category CLI commands
//!
//! Categories come from the classification table; they are edited in
//! `data/classifications.json`, not through the CLI.

use clap::Subcommand;

use crate::display::format_classification_table;
use crate::error::{CashbookError, CashbookResult};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List every category and how it is classified
    List,
    /// Show one category's classification
    Show {
        /// Category key
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> CashbookResult<()> {
    let table = storage.classifications();

    match cmd {
        CategoryCommands::List => {
            let counts = storage.transactions.category_counts()?;
            print!("{}", format_classification_table(table, &counts));
            println!(
                "Classification file: {}",
                storage.paths().classifications_file().display()
            );
        }

        CategoryCommands::Show { category } => {
            let entry = table
                .get(&category)
                .ok_or_else(|| CashbookError::category_not_found(&category))?;
            let used = storage.transactions.get_by_category(&category)?.len();

            println!("Category:   {}", entry.category);
            println!("Account:    {}", entry.account);
            println!("Statement:  {}", entry.statement);
            println!("Line item:  {}", entry.line_item);
            println!("Effect:     {}", i8::from(entry.effect));
            if let Some(flow) = entry.flow {
                println!("Cash flow:  {}", flow);
            }
            println!("Used by:    {} transaction(s)", used);
        }
    }

    Ok(())
}
