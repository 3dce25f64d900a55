//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// Bulk load from an export file
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// What an entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A single transaction
    Transaction,
    /// The transaction set as a whole (imports)
    Ledger,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Ledger => write!(f, "Ledger"),
        }
    }
}

/// A single audit log entry
///
/// One line of the JSONL audit log. `before` is set for updates and deletes,
/// `after` for creates and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// Human-readable label, e.g. the transaction description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn for_transaction(operation: Operation, txn: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type: EntityType::Transaction,
            entity_id: txn.id.to_string(),
            label: Some(txn.description.clone()),
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create(txn: &Transaction) -> Self {
        Self {
            after: serde_json::to_value(txn).ok(),
            ..Self::for_transaction(Operation::Create, txn)
        }
    }

    pub fn update(before: &Transaction, after: &Transaction, diff_summary: Option<String>) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::for_transaction(Operation::Update, after)
        }
    }

    pub fn delete(txn: &Transaction) -> Self {
        Self {
            before: serde_json::to_value(txn).ok(),
            ..Self::for_transaction(Operation::Delete, txn)
        }
    }

    /// Record a bulk import; only counts are kept, not the payload
    pub fn import(source: impl Into<String>, imported: usize, skipped: usize, replaced: bool) -> Self {
        let mode = if replaced { "replace" } else { "merge" };
        Self {
            timestamp: Utc::now(),
            operation: Operation::Import,
            entity_type: EntityType::Ledger,
            entity_id: source.into(),
            label: Some(format!("{} mode", mode)),
            before: None,
            after: None,
            diff_summary: Some(format!("{} imported, {} skipped", imported, skipped)),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(label) = &self.label {
            output.push_str(&format!(" ({})", label));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
