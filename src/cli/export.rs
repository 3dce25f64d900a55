//! CLI commands for data export and import

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{CashbookError, CashbookResult};
use crate::export::{self, FullExport};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Full ledger as JSON (re-importable)
    Json {
        output: PathBuf,
        /// Compact output
        #[arg(long)]
        compact: bool,
    },
    /// Full ledger as YAML
    Yaml { output: PathBuf },
    /// Transactions with their classification as CSV
    Csv { output: PathBuf },
}

fn create_output(path: &Path) -> CashbookResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        CashbookError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> CashbookResult<()> {
    let count = storage.transactions.count()?;

    match cmd {
        ExportCommands::Json { output, compact } => {
            let mut writer = create_output(&output)?;
            export::export_full_json(storage, &mut writer, !compact)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        ExportCommands::Yaml { output } => {
            let mut writer = create_output(&output)?;
            export::export_full_yaml(storage, &mut writer)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        ExportCommands::Csv { output } => {
            let mut writer = create_output(&output)?;
            export::export_transactions_csv(storage, &mut writer)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
    }

    Ok(())
}

/// Handle `cashbook import <file>`; `.yaml`/`.yml` files are read as YAML,
/// anything else as JSON
pub fn handle_import_command(storage: &Storage, file: &Path, replace: bool) -> CashbookResult<()> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        CashbookError::Import(format!("Failed to read {}: {}", file.display(), e))
    })?;

    let is_yaml = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let data: FullExport = if is_yaml {
        export::import_from_yaml(&content)?
    } else {
        export::import_from_json(&content)?
    };

    let summary = export::apply_import(storage, data, &file.display().to_string(), replace)?;

    if replace {
        println!("Replaced ledger with {} transactions", summary.imported);
    } else {
        println!(
            "Imported {} transactions ({} already present, skipped)",
            summary.imported, summary.skipped
        );
    }
    if summary.unclassified > 0 {
        println!(
            "Warning: {} imported transaction(s) use categories missing from the classification table and will be excluded from reports",
            summary.unclassified
        );
    }

    Ok(())
}
