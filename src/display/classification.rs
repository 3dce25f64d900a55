//! Classification table display

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{ClassificationEntry, ClassificationTable, Effect};

#[derive(Tabled)]
pub struct ClassificationRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Account")]
    pub account: String,
    #[tabled(rename = "Statement")]
    pub statement: String,
    #[tabled(rename = "Line Item")]
    pub line_item: String,
    #[tabled(rename = "Effect")]
    pub effect: &'static str,
    #[tabled(rename = "Cash Flow")]
    pub flow: String,
    #[tabled(rename = "Txns")]
    pub count: usize,
}

impl ClassificationRow {
    pub fn new(entry: &ClassificationEntry, count: usize) -> Self {
        Self {
            category: entry.category.clone(),
            account: entry.account.clone(),
            statement: entry.statement.to_string(),
            line_item: entry.line_item.clone(),
            effect: match entry.effect {
                Effect::Increase => "+",
                Effect::Decrease => "-",
            },
            flow: entry.flow.map(|f| f.to_string()).unwrap_or_default(),
            count,
        }
    }
}

/// Render the table in declaration order, with per-category usage counts
pub fn format_classification_table(
    table: &ClassificationTable,
    counts: &HashMap<String, usize>,
) -> String {
    if table.is_empty() {
        return "No categories defined.\n".to_string();
    }

    let rows: Vec<ClassificationRow> = table
        .entries()
        .iter()
        .map(|e| ClassificationRow::new(e, counts.get(&e.category).copied().unwrap_or(0)))
        .collect();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');

    let unclassified: Vec<(&String, &usize)> = counts
        .iter()
        .filter(|(category, _)| !table.contains(category))
        .collect();
    if !unclassified.is_empty() {
        output.push_str("\nUnclassified categories in use (excluded from reports):\n");
        let mut unclassified = unclassified;
        unclassified.sort();
        for (category, count) in unclassified {
            output.push_str(&format!("  {} ({} transaction(s))\n", category, count));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_category() {
        let table = ClassificationTable::standard();
        let mut counts = HashMap::new();
        counts.insert("Rent Expense".to_string(), 4);

        let text = format_classification_table(&table, &counts);
        for category in table.categories() {
            assert!(text.contains(category), "missing {}", category);
        }
        assert!(text.contains("Investing Activities"));
        assert!(!text.contains("Unclassified"));
    }

    #[test]
    fn test_unclassified_usage_reported() {
        let mut counts = HashMap::new();
        counts.insert("Lottery".to_string(), 2);

        let text = format_classification_table(&ClassificationTable::standard(), &counts);
        assert!(text.contains("Lottery (2 transaction(s))"));
    }

    #[test]
    fn test_empty_table() {
        let text = format_classification_table(&ClassificationTable::empty(), &HashMap::new());
        assert_eq!(text, "No categories defined.\n");
    }
}
