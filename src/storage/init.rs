//! First-run setup

use crate::config::paths::CashbookPaths;
use crate::error::CashbookResult;
use crate::models::ClassificationTable;

use super::classifications::save_classifications;

/// Create the data directory and seed an editable copy of the standard
/// classification table. Existing files are left untouched.
///
/// Returns `true` if the classification table was written.
pub fn initialize_storage(paths: &CashbookPaths) -> CashbookResult<bool> {
    paths.ensure_directories()?;

    let table_path = paths.classifications_file();
    if table_path.exists() {
        return Ok(false);
    }

    save_classifications(&table_path, &ClassificationTable::standard())?;
    log::info!("Wrote standard classification table to {}", table_path.display());
    Ok(true)
}
