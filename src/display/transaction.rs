//! Transaction display formatting
//!
//! Register tables for `txn list` and the detail view for `txn show`.

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::{ClassificationTable, Money, Transaction};

/// One register row
#[derive(Tabled)]
pub struct TransactionRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
}

impl TransactionRow {
    pub fn new(txn: &Transaction, date_format: &str, symbol: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: format_date(txn.date, date_format),
            category: txn.category.clone(),
            description: truncate(&txn.description, 32),
            amount: txn.amount.format_with_symbol(symbol),
        }
    }
}

/// Render a date with a user pattern, falling back to ISO when the pattern is invalid
fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(date_format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    rendered
}

/// Format a list of transactions as a register table
pub fn format_transaction_register(
    transactions: &[Transaction],
    date_format: &str,
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow::new(t, date_format, symbol))
        .collect();
    let total: Money = transactions.iter().map(|t| t.amount).sum();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format!(
        "{} transaction(s), {} total\n",
        transactions.len(),
        total.format_with_symbol(symbol)
    ));
    output
}

/// Format transaction details, including how its category is classified
pub fn format_transaction_details(
    txn: &Transaction,
    table: &ClassificationTable,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Description: {}\n", txn.description));

    match table.get(&txn.category) {
        Some(entry) => {
            output.push_str(&format!(
                "Posts to:    {} / {} ({})\n",
                entry.account, entry.line_item, entry.statement
            ));
            if let Some(flow) = entry.flow {
                output.push_str(&format!("Cash flow:   {}\n", flow));
            }
        }
        None => output.push_str("Posts to:    (unclassified, excluded from reports)\n"),
    }

    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if txn.updated_at != txn.created_at {
        output.push_str(&format!(
            "Updated:     {}\n",
            txn.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "January rent",
            "Rent Expense",
            Money::from_units(1200),
        )
    }

    #[test]
    fn test_register() {
        let text = format_transaction_register(&[sample()], "%Y-%m-%d", "$");
        assert!(text.contains("2024-01-10"));
        assert!(text.contains("Rent Expense"));
        assert!(text.contains("$1,200.00"));
        assert!(text.contains("1 transaction(s)"));
    }

    #[test]
    fn test_register_survives_invalid_date_format() {
        let text = format_transaction_register(&[sample()], "%Q", "$");
        assert!(text.contains("2024-01-10"));
        assert_eq!(format_date(sample().date, "%d/%m/%Y"), "10/01/2024");
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], "%Y-%m-%d", "$"),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_details_show_classification() {
        let table = ClassificationTable::standard();
        let text = format_transaction_details(&sample(), &table, "$");
        assert!(text.contains("Rent Expense / Operating Expenses"));
        assert!(text.contains("Operating Activities"));

        let mut unknown = sample();
        unknown.category = "Mystery".into();
        let text = format_transaction_details(&unknown, &table, "$");
        assert!(text.contains("unclassified"));
    }
}
