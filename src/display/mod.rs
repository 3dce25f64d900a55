//! Display formatting for terminal output
//!
//! Statement line layout, bar charts, and tables for transactions and the
//! classification table.

pub mod classification;
pub mod report;
pub mod transaction;

pub use classification::format_classification_table;
pub use transaction::{format_transaction_details, format_transaction_register, TransactionRow};
