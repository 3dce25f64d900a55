//! Service layer for Cashbook
//!
//! Business rules on top of storage: validation against the active
//! classification table, persistence and audit logging.

pub mod report;
pub mod transaction;

pub use report::ReportService;
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
