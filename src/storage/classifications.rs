//! Classification table loading
//!
//! The active table is `data/classifications.json` when present, so users can
//! rename accounts or add categories; otherwise the built-in standard table.

use std::path::Path;

use crate::error::{CashbookError, CashbookResult};
use crate::models::ClassificationTable;

use super::file_io::{read_json_optional, write_json_atomic};

/// Load the table at `path`, falling back to the standard table
pub fn load_classifications(path: &Path) -> CashbookResult<ClassificationTable> {
    match read_json_optional::<ClassificationTable, _>(path) {
        Ok(Some(table)) => {
            log::debug!("Loaded {} classifications from {}", table.len(), path.display());
            Ok(table)
        }
        Ok(None) => {
            log::debug!("No {}, using the standard classification table", path.display());
            Ok(ClassificationTable::standard())
        }
        Err(e) => Err(CashbookError::Validation(format!(
            "Invalid classification table: {}",
            e
        ))),
    }
}

/// Persist a table in the same format `load_classifications` reads
pub fn save_classifications(path: &Path, table: &ClassificationTable) -> CashbookResult<()> {
    write_json_atomic(path, table)
}
