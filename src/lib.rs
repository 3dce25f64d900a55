//! Cashbook - cash-basis bookkeeping for a single business
//!
//! Transactions are recorded with a category key. A classification table maps
//! each key to a ledger account, a statement, a line item, an effect and a
//! cash-flow section, and the report engine derives the financial statements
//! from that mapping alone.
//!
//! # Architecture
//!
//! - `config`: data directory resolution and user settings
//! - `error`: custom error types
//! - `models`: money, transactions, periods and the classification table
//! - `reports`: statement aggregation, period selection, trend and ratios
//! - `storage`: JSON file storage layer
//! - `services`: business logic layer
//! - `audit`: audit logging system
//! - `export`: JSON/YAML/CSV export and import
//! - `display`: terminal formatting
//! - `cli`: command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use cashbook::models::{ClassificationTable, ReportPeriod};
//! use cashbook::reports::FinancialReport;
//!
//! let table = ClassificationTable::standard();
//! let report = FinancialReport::generate(&transactions, &table, ReportPeriod::current());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{CashbookError, CashbookResult};
