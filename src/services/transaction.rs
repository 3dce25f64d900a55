//! Transaction service
//!
//! Validated create, update and delete of transactions. Every mutation is
//! saved to disk and recorded in the audit log before returning.

use chrono::{NaiveDate, Utc};

use crate::audit::describe_changes;
use crate::error::{CashbookError, CashbookResult};
use crate::models::{Money, ReportPeriod, Transaction, TransactionId};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Exact category key
    pub category: Option<String>,
    /// Calendar month
    pub period: Option<ReportPeriod>,
    /// Inclusive start date
    pub from: Option<NaiveDate>,
    /// Inclusive end date
    pub to: Option<NaiveDate>,
    /// Keep only the most recent N matches
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn period(mut self, period: ReportPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        if let Some(period) = &self.period {
            if txn.month_key() != period.key() {
                return false;
            }
        }
        if let Some(from) = self.from {
            if txn.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if txn.date > to {
                return false;
            }
        }
        true
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Money,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Money>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn check_category(&self, category: &str) -> CashbookResult<()> {
        if self.storage.classifications().contains(category) {
            Ok(())
        } else {
            Err(CashbookError::category_not_found(category))
        }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> CashbookResult<Transaction> {
        let category = input.category.trim().to_string();
        self.check_category(&category)?;

        let txn = Transaction::new(
            input.date,
            input.description.trim(),
            category,
            input.amount,
        );
        txn.validate()?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_create(&txn)?;

        log::info!("Created transaction {} ({} {})", txn.id, txn.category, txn.amount);
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> CashbookResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full UUID or short `txn-xxxxxxxx` form
    pub fn find(&self, identifier: &str) -> CashbookResult<Transaction> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<TransactionId>() {
            if let Some(txn) = self.storage.transactions.get(id)? {
                return Ok(txn);
            }
        }

        let mut matches = self.storage.transactions.find_by_short_id(identifier)?;
        match matches.len() {
            0 => Err(CashbookError::transaction_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(CashbookError::Ambiguous {
                identifier: identifier.to_string(),
                matches: n,
            }),
        }
    }

    /// List transactions, oldest first
    pub fn list(&self, filter: TransactionFilter) -> CashbookResult<Vec<Transaction>> {
        let mut transactions = match &filter.category {
            Some(category) => self.storage.transactions.get_by_category(category)?,
            None => self.storage.transactions.get_all()?,
        };

        transactions.retain(|t| filter.matches(t));

        if let Some(limit) = filter.limit {
            let start = transactions.len().saturating_sub(limit);
            transactions.drain(..start);
        }

        Ok(transactions)
    }

    /// Snapshot of every transaction, for report generation
    pub fn all(&self) -> CashbookResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    /// Apply a partial update
    pub fn update(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> CashbookResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| CashbookError::transaction_not_found(id.to_string()))?;
        let before = txn.clone();

        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(category) = input.category {
            let category = category.trim().to_string();
            self.check_category(&category)?;
            txn.category = category;
        }
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }

        txn.validate()?;

        let diff = describe_changes(&before, &txn);
        if diff.is_none() {
            return Ok(before);
        }
        txn.updated_at = Utc::now();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_update(&before, &txn, diff)?;

        log::info!("Updated transaction {}", txn.id);
        Ok(txn)
    }

    /// Delete a transaction, returning what was removed
    pub fn delete(&self, id: TransactionId) -> CashbookResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| CashbookError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.save()?;
        self.storage.log_delete(&txn)?;

        log::info!("Deleted transaction {}", txn.id);
        Ok(txn)
    }
}
