//! Audit logging for Cashbook
//!
//! Every transaction create, update, delete and import is appended to
//! `audit.log` as one JSON object per line, with before/after snapshots and
//! a short change summary for updates.

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
