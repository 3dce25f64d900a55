//! CSV export of transactions
//!
//! One row per transaction, with the account and statement its category
//! posts to so the file can be pivoted in a spreadsheet.

use std::io::Write;

use crate::error::{CashbookError, CashbookResult};
use crate::storage::Storage;

/// Export all transactions, oldest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: &mut W) -> CashbookResult<()> {
    let table = storage.classifications();
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "ID",
        "Date",
        "Description",
        "Category",
        "Amount",
        "Account",
        "Statement",
        "Line Item",
    ])?;

    for txn in storage.transactions.get_all()? {
        let (account, statement, line_item) = match table.get(&txn.category) {
            Some(entry) => (
                entry.account.clone(),
                entry.statement.to_string(),
                entry.line_item.clone(),
            ),
            None => (String::new(), "Unclassified".to_string(), String::new()),
        };

        csv_writer.write_record([
            txn.id.as_uuid().to_string(),
            txn.date.to_string(),
            txn.description,
            txn.category,
            txn.amount.to_string(),
            account,
            statement,
            line_item,
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| CashbookError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CashbookPaths;
    use crate::models::{Money, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_export_transactions_csv() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        storage
            .transactions
            .upsert(Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                "Rent, January",
                "Rent Expense",
                Money::from_units(300),
            ))
            .unwrap();
        storage
            .transactions
            .upsert(Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
                "Mystery",
                "Unknown",
                Money::from_units(5),
            ))
            .unwrap();

        let mut out = Vec::new();
        export_transactions_csv(&storage, &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ID,Date,Description,Category,Amount,Account,Statement,Line Item"
        );
        assert!(lines[1].contains(
            "2024-01-10,\"Rent, January\",Rent Expense,300.00,Rent Expense,Profit & Loss,Operating Expenses"
        ));
        assert!(lines[2].ends_with("Unknown,5.00,,Unclassified,"));
    }
}
