//! Transaction model
//!
//! A dated cash movement tagged with a category key. The amount is an
//! unsigned magnitude; direction comes from the category's classification.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// A recorded cash transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, stable for the record's lifetime
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-text label
    pub description: String,

    /// Category key looked up in the classification table
    pub category: String,

    /// Positive magnitude
    pub amount: Money,

    /// When the transaction was created (informational only)
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Largest amount a single transaction may carry (one trillion units);
    /// keeps ledger totals far inside the `i64` cent range
    pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000_000);

    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            date,
            description: description.into(),
            category: category.into(),
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// ISO `YYYY-MM-DD` rendering of the date, whose lexicographic order is
    /// chronological order
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Year-month prefix (`YYYY-MM`) of the date
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// True when the amount is positive and no larger than `MAX_AMOUNT`
    pub fn has_valid_amount(&self) -> bool {
        self.amount.is_positive() && self.amount <= Self::MAX_AMOUNT
    }

    /// Validate the transaction before it enters storage or the engine
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount > Self::MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date_key(),
            self.description,
            self.category,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    EmptyCategory,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
            Self::EmptyCategory => write!(f, "Transaction category cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Transaction amount {} exceeds the maximum of {}",
                amount,
                Transaction::MAX_AMOUNT
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
