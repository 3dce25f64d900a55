//! Error types for Cashbook
//!
//! Only the storage, service and CLI layers return these. Statement
//! derivation in `reports` is infallible: unknown categories and bad amounts
//! are excluded, never raised.

use thiserror::Error;

use crate::models::{ClassificationError, TransactionValidationError};

#[derive(Error, Debug)]
pub enum CashbookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// Bad user input (dates, amounts, periods, identifiers)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(#[from] TransactionValidationError),

    /// A classification table that fails its own consistency checks
    #[error("Invalid classification table: {0}")]
    Classification(#[from] ClassificationError),

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A short transaction id that matches more than one transaction
    #[error("Identifier '{identifier}' is ambiguous ({matches} transactions match)")]
    Ambiguous { identifier: String, matches: usize },

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CashbookError {
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// A category key missing from the active classification table
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for every error caused by the caller's input rather than the
    /// environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidTransaction(_)
                | Self::Classification(_)
                | Self::Ambiguous { .. }
        )
    }
}

impl From<std::io::Error> for CashbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CashbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CashbookError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

pub type CashbookResult<T> = Result<T, CashbookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_category_not_found() {
        let err = CashbookError::category_not_found("Lottery Winnings");
        assert_eq!(err.to_string(), "Category not found: Lottery Winnings");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_model_errors_convert() {
        let err: CashbookError = TransactionValidationError::NonPositiveAmount(Money::zero()).into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid transaction: Transaction amount must be positive, got 0.00"
        );

        let err: CashbookError = ClassificationError::DuplicateCategory("Rent Expense".into()).into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Duplicate category key: Rent Expense"));
    }

    #[test]
    fn test_ambiguous_identifier() {
        let err = CashbookError::Ambiguous {
            identifier: "txn-1a".into(),
            matches: 2,
        };
        assert_eq!(
            err.to_string(),
            "Identifier 'txn-1a' is ambiguous (2 transactions match)"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CashbookError = io_err.into();
        assert!(matches!(err, CashbookError::Io(_)));
    }
}
