//! Core data models for Cashbook
//!
//! Transactions, money, reporting periods and the category classification
//! table that gives each transaction its accounting treatment.

pub mod classification;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use classification::{
    CashFlowSection, ClassificationEntry, ClassificationError, ClassificationTable, Effect,
    PositionSection, StatementKind,
};
pub use ids::TransactionId;
pub use money::Money;
pub use period::ReportPeriod;
pub use transaction::{Transaction, TransactionValidationError};
