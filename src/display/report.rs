//! Report formatting utilities for terminal output

use crate::models::Money;

use std::collections::BTreeMap;

/// Format an amount accountant-style: negatives in parentheses
pub fn format_amount(amount: Money, symbol: &str) -> String {
    if amount.is_negative() {
        format!("({})", amount.abs().format_with_symbol(symbol))
    } else {
        amount.format_with_symbol(symbol)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Order map entries by a preferred key order; unlisted keys follow
/// alphabetically
pub fn ordered_lines<'a, S: AsRef<str>>(
    lines: &'a BTreeMap<String, Money>,
    order: &[S],
) -> Vec<(&'a str, Money)> {
    let mut result: Vec<(&'a str, Money)> = Vec::with_capacity(lines.len());

    for key in order {
        if let Some((name, amount)) = lines.get_key_value(key.as_ref()) {
            result.push((name.as_str(), *amount));
        }
    }

    for (name, amount) in lines {
        if !order.iter().any(|k| k.as_ref() == name) {
            result.push((name.as_str(), *amount));
        }
    }

    result
}

/// A `label ........ amount` row
pub fn line(label: &str, amount: Money, symbol: &str, indent: usize) -> String {
    let label = format!("{}{}", " ".repeat(indent), label);
    format!("{:<44} {:>20}\n", label, format_amount(amount, symbol))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
