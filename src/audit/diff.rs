//! Change summaries for transaction updates

use crate::models::Transaction;

/// Describe which user-visible fields changed, e.g.
/// `amount: 1500.00 -> 1400.00, category: "Rent Expense" -> "Utilities Expense"`
///
/// Returns `None` when nothing user-visible changed.
pub fn describe_changes(before: &Transaction, after: &Transaction) -> Option<String> {
    let mut changes = Vec::new();

    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!(
            "category: \"{}\" -> \"{}\"",
            before.category, after.category
        ));
    }
    if before.description != after.description {
        changes.push(format!(
            "description: {} -> {}",
            quote(&before.description),
            quote(&after.description)
        ));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn quote(s: &str) -> String {
    if s.chars().count() > 40 {
        let kept: String = s.chars().take(37).collect();
        format!("\"{}...\"", kept)
    } else {
        format!("\"{}\"", s)
    }
}
