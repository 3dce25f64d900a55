//! JSON export and import
//!
//! A full export carries every transaction plus a schema version, so it can
//! be restored with `cashbook import`.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CashbookError, CashbookResult};
use crate::models::Transaction;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub transactions: Vec<Transaction>,
    pub metadata: ExportMetadata,
}

/// Summary figures, informational only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

/// Outcome of an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    /// Already present (merge mode only)
    pub skipped: usize,
    /// Imported, but their category is not in the active table
    pub unclassified: usize,
}

impl FullExport {
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            metadata,
        }
    }

    pub fn from_storage(storage: &Storage) -> CashbookResult<Self> {
        Ok(Self::from_transactions(storage.transactions.get_all()?))
    }

    /// Check the schema major version and every transaction
    pub fn validate(&self) -> Result<(), String> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        if major(&self.schema_version) != major(EXPORT_SCHEMA_VERSION) {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        for txn in &self.transactions {
            txn.validate()
                .map_err(|e| format!("Transaction {} is invalid: {}", txn.id, e))?;
            if !seen.insert(txn.id) {
                return Err(format!("Transaction {} appears more than once", txn.id));
            }
        }

        Ok(())
    }
}

/// Export every stored transaction to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> CashbookResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| CashbookError::Export(e.to_string()))
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> CashbookResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| CashbookError::Import(e.to_string()))?;
    export.validate().map_err(CashbookError::Import)?;
    Ok(export)
}

/// Load a validated export into storage
///
/// Merge mode keeps existing transactions and skips ids already present;
/// replace mode swaps in the imported set wholesale.
pub fn apply_import(
    storage: &Storage,
    export: FullExport,
    source: &str,
    replace: bool,
) -> CashbookResult<ImportSummary> {
    let table = storage.classifications();
    let mut summary = ImportSummary {
        unclassified: export
            .transactions
            .iter()
            .filter(|t| !table.contains(&t.category))
            .count(),
        ..ImportSummary::default()
    };

    if replace {
        summary.imported = export.transactions.len();
        storage.transactions.replace_all(export.transactions)?;
    } else {
        for txn in export.transactions {
            if storage.transactions.contains(txn.id)? {
                summary.skipped += 1;
                if !table.contains(&txn.category) {
                    summary.unclassified -= 1;
                }
                continue;
            }
            storage.transactions.upsert(txn)?;
            summary.imported += 1;
        }
    }

    storage.transactions.save()?;
    storage.log_import(source, summary.imported, summary.skipped, replace)?;

    log::info!(
        "Imported {} transactions from {} ({} skipped)",
        summary.imported,
        source,
        summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CashbookPaths;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn txn(day: u32, category: &str, units: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            category,
            category,
            Money::from_units(units),
        )
    }

    #[test]
    fn test_full_export_metadata() {
        let (_temp_dir, storage) = create_test_storage();
        storage.transactions.upsert(txn(20, "Sales Revenue", 10)).unwrap();
        storage.transactions.upsert(txn(3, "Rent Expense", 5)).unwrap();

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2024-01-03"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2024-01-20"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        let original = txn(5, "Sales Revenue", 1000);
        storage.transactions.upsert(original.clone()).unwrap();

        let mut out = Vec::new();
        export_full_json(&storage, &mut out, true).unwrap();
        let imported = import_from_json(&String::from_utf8(out).unwrap()).unwrap();

        assert_eq!(imported.transactions, vec![original]);
    }

    #[test]
    fn test_validation_failures() {
        let mut export = FullExport::from_transactions(vec![txn(1, "Sales Revenue", 10)]);
        export.schema_version = "2.0.0".into();
        assert!(export.validate().unwrap_err().contains("Schema version"));

        let dup = txn(1, "Sales Revenue", 10);
        let export = FullExport::from_transactions(vec![dup.clone(), dup]);
        assert!(export.validate().unwrap_err().contains("more than once"));

        let mut bad = txn(1, "Sales Revenue", 10);
        bad.amount = Money::zero();
        let json = serde_json::to_string(&FullExport::from_transactions(vec![bad])).unwrap();
        assert!(matches!(import_from_json(&json), Err(CashbookError::Import(_))));
    }

    #[test]
    fn test_merge_skips_existing() {
        let (_temp_dir, storage) = create_test_storage();
        let existing = txn(1, "Sales Revenue", 10);
        storage.transactions.upsert(existing.clone()).unwrap();

        let export = FullExport::from_transactions(vec![
            existing,
            txn(2, "Rent Expense", 5),
            txn(3, "Crypto Gains", 7),
        ]);
        let summary = apply_import(&storage, export, "in.json", false).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.unclassified, 1);
        assert_eq!(storage.transactions.count().unwrap(), 3);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_mode() {
        let (_temp_dir, storage) = create_test_storage();
        storage.transactions.upsert(txn(1, "Sales Revenue", 10)).unwrap();

        let export = FullExport::from_transactions(vec![txn(2, "Rent Expense", 5)]);
        let summary = apply_import(&storage, export, "in.json", true).unwrap();

        assert_eq!(summary.imported, 1);
        let all = storage.transactions.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category, "Rent Expense");
    }
}
