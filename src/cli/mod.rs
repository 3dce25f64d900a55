//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer and the report
//! engine.

pub mod category;
pub mod export;
pub mod history;
pub mod report;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, handle_import_command, ExportCommands};
pub use history::handle_history_command;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{CashbookError, CashbookResult};
use crate::models::{Money, ReportPeriod};

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_date(value: &str) -> CashbookResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CashbookError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", value))
    })
}

/// Parse an amount argument such as `1250.50` or `1,250.50`
pub(crate) fn parse_amount(value: &str) -> CashbookResult<Money> {
    Money::parse(value)
        .map_err(|e| CashbookError::Validation(format!("Invalid amount '{}': {}", value, e)))
}

/// Parse a `YYYY-MM` argument
pub(crate) fn parse_period(value: &str) -> CashbookResult<ReportPeriod> {
    ReportPeriod::parse(value).map_err(|e| {
        CashbookError::Validation(format!(
            "Invalid period '{}': {}. Use YYYY-MM (e.g., 2024-01)",
            value, e
        ))
    })
}
