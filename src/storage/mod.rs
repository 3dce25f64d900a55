//! Storage layer for Cashbook
//!
//! JSON file storage with atomic writes, the transaction repository, the
//! active classification table and the audit log.

pub mod classifications;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use classifications::{load_classifications, save_classifications};
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::CashbookPaths;
use crate::error::CashbookResult;
use crate::models::{ClassificationTable, Transaction};

/// Main storage coordinator
pub struct Storage {
    paths: CashbookPaths,
    pub transactions: TransactionRepository,
    classifications: ClassificationTable,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage handle; call `load_all` before reading
    pub fn new(paths: CashbookPaths) -> CashbookResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            classifications: ClassificationTable::standard(),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &CashbookPaths {
        &self.paths
    }

    /// The classification table in effect
    pub fn classifications(&self) -> &ClassificationTable {
        &self.classifications
    }

    /// Swap in another table for this session (not persisted)
    pub fn set_classifications(&mut self, table: ClassificationTable) {
        self.classifications = table;
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load transactions and the classification table from disk
    pub fn load_all(&mut self) -> CashbookResult<()> {
        self.transactions.load()?;
        self.classifications = load_classifications(&self.paths.classifications_file())?;
        Ok(())
    }

    pub fn save_all(&self) -> CashbookResult<()> {
        self.transactions.save()
    }

    pub fn log_create(&self, txn: &Transaction) -> CashbookResult<()> {
        self.audit.log(&AuditEntry::create(txn))
    }

    pub fn log_update(
        &self,
        before: &Transaction,
        after: &Transaction,
        diff_summary: Option<String>,
    ) -> CashbookResult<()> {
        self.audit.log(&AuditEntry::update(before, after, diff_summary))
    }

    pub fn log_delete(&self, txn: &Transaction) -> CashbookResult<()> {
        self.audit.log(&AuditEntry::delete(txn))
    }

    pub fn log_import(
        &self,
        source: &str,
        imported: usize,
        skipped: usize,
        replaced: bool,
    ) -> CashbookResult<()> {
        self.audit
            .log(&AuditEntry::import(source, imported, skipped, replaced))
    }
}
