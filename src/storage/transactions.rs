//! Transaction repository for JSON storage
//!
//! Keeps every transaction in memory, indexed by category key, and persists
//! the set to `data/transactions.json`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::{CashbookError, CashbookResult};
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of `transactions.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<TransactionId, Transaction>,
    /// category key -> transaction ids
    by_category: HashMap<String, Vec<TransactionId>>,
}

impl Inner {
    fn index(&mut self, txn: &Transaction) {
        self.by_category
            .entry(txn.category.clone())
            .or_default()
            .push(txn.id);
    }

    fn unindex(&mut self, txn: &Transaction) {
        if let Some(ids) = self.by_category.get_mut(&txn.category) {
            ids.retain(|&id| id != txn.id);
            if ids.is_empty() {
                self.by_category.remove(&txn.category);
            }
        }
    }

    fn clear(&mut self) {
        self.data.clear();
        self.by_category.clear();
    }

    fn insert(&mut self, txn: Transaction) {
        if let Some(old) = self.data.remove(&txn.id) {
            self.unindex(&old);
        }
        self.index(&txn);
        self.data.insert(txn.id, txn);
    }

    /// Chronological snapshot: by date, then creation time
    fn sorted(&self, ids: Option<&[TransactionId]>) -> Vec<Transaction> {
        let mut transactions: Vec<Transaction> = match ids {
            Some(ids) => ids.iter().filter_map(|id| self.data.get(id).cloned()).collect(),
            None => self.data.values().cloned().collect(),
        };
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        transactions
    }
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            inner: RwLock::new(Inner::default()),
        }
    }

    fn read(&self) -> CashbookResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> CashbookResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transactions from disk and rebuild the index
    pub fn load(&self) -> CashbookResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;
        let count = file_data.transactions.len();

        let mut inner = self.write()?;
        inner.clear();
        for txn in file_data.transactions {
            inner.insert(txn);
        }

        log::debug!("Loaded {} transactions from {}", count, self.path.display());
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> CashbookResult<()> {
        let transactions = self.read()?.sorted(None);
        let count = transactions.len();

        write_json_atomic(&self.path, &TransactionData { transactions })?;
        log::debug!("Saved {} transactions to {}", count, self.path.display());
        Ok(())
    }

    pub fn get(&self, id: TransactionId) -> CashbookResult<Option<Transaction>> {
        Ok(self.read()?.data.get(&id).cloned())
    }

    /// Transactions whose id matches a short display form like `txn-1a2b3c4d`
    pub fn find_by_short_id(&self, short: &str) -> CashbookResult<Vec<Transaction>> {
        let inner = self.read()?;
        Ok(inner
            .data
            .values()
            .filter(|t| t.id.matches_short(short))
            .cloned()
            .collect())
    }

    /// Consistent snapshot of every transaction, oldest first
    pub fn get_all(&self) -> CashbookResult<Vec<Transaction>> {
        Ok(self.read()?.sorted(None))
    }

    pub fn get_by_category(&self, category: &str) -> CashbookResult<Vec<Transaction>> {
        let inner = self.read()?;
        let ids = inner.by_category.get(category).map(|v| v.as_slice()).unwrap_or(&[]);
        Ok(inner.sorted(Some(ids)))
    }

    /// Category keys in use, with their transaction counts
    pub fn category_counts(&self) -> CashbookResult<HashMap<String, usize>> {
        let inner = self.read()?;
        Ok(inner
            .by_category
            .iter()
            .map(|(k, ids)| (k.clone(), ids.len()))
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> CashbookResult<()> {
        self.write()?.insert(txn);
        Ok(())
    }

    /// Replace the whole set
    pub fn replace_all(&self, transactions: Vec<Transaction>) -> CashbookResult<()> {
        let mut inner = self.write()?;
        inner.clear();
        for txn in transactions {
            inner.insert(txn);
        }
        Ok(())
    }

    /// Remove a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> CashbookResult<Option<Transaction>> {
        let mut inner = self.write()?;
        let removed = inner.data.remove(&id);
        if let Some(txn) = &removed {
            inner.unindex(txn);
        }
        Ok(removed)
    }

    pub fn contains(&self, id: TransactionId) -> CashbookResult<bool> {
        Ok(self.read()?.data.contains_key(&id))
    }

    pub fn count(&self) -> CashbookResult<usize> {
        Ok(self.read()?.data.len())
    }
}
