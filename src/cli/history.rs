//! `cashbook history`: recent audit log entries

use crate::error::CashbookResult;
use crate::storage::Storage;

pub fn handle_history_command(storage: &Storage, limit: usize) -> CashbookResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
