//! YAML export and import
//!
//! Same structure as the JSON export, for people who want to read or
//! hand-edit their ledger.

use std::io::Write;

use crate::error::{CashbookError, CashbookResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export every stored transaction to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> CashbookResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# Cashbook ledger export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| CashbookError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| CashbookError::Export(e.to_string()))
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> CashbookResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| CashbookError::Import(e.to_string()))?;
    export.validate().map_err(CashbookError::Import)?;
    Ok(export)
}
