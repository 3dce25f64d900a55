//! Export and import for Cashbook
//!
//! - JSON: full ledger export, also the import format
//! - YAML: the same structure in a human-readable form
//! - CSV: transactions with their classification, for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use json::{
    apply_import, export_full_json, import_from_json, FullExport, ImportSummary,
    EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_full_yaml, import_from_yaml};
