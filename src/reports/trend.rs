//! Monthly trend
//!
//! Buckets profit-or-loss transactions by calendar month for time-series
//! display. Months without any profit-or-loss transaction are omitted.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{CashbookError, CashbookResult};
use crate::models::{ClassificationTable, Money, Transaction};

#[derive(Debug, Default, Clone, Copy)]
struct MonthBucket {
    revenue: Money,
    expenses: Money,
    net_profit: Money,
}

/// Parallel per-month series, ordered by ascending month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    /// `YYYY-MM` month keys
    pub labels: Vec<String>,
    /// Sum of positive contributions
    pub revenue: Vec<Money>,
    /// Sum of negative contributions, as positive magnitudes
    pub expenses: Vec<Money>,
    pub net_profit: Vec<Money>,
}

/// Build the monthly trend over a transaction history
pub fn monthly_trend<'a, I>(transactions: I, table: &ClassificationTable) -> MonthlyTrend
where
    I: IntoIterator<Item = &'a Transaction>,
{
    MonthlyTrend::from_transactions(transactions, table)
}

impl MonthlyTrend {
    pub fn from_transactions<'a, I>(transactions: I, table: &ClassificationTable) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut months: BTreeMap<String, MonthBucket> = BTreeMap::new();

        for txn in transactions {
            let Some(entry) = table.get(&txn.category) else {
                continue;
            };
            if !entry.is_profit_and_loss() || !txn.has_valid_amount() {
                continue;
            }

            let signed = entry.effect.apply(txn.amount);
            let bucket = months.entry(txn.month_key()).or_default();
            bucket.net_profit += signed;

            // Bucketed by the sign of this transaction's own contribution
            if signed.is_positive() {
                bucket.revenue += signed;
            } else if signed.is_negative() {
                bucket.expenses += signed;
            }
        }

        let mut trend = Self::default();
        for (label, bucket) in months {
            trend.labels.push(label);
            trend.revenue.push(bucket.revenue);
            trend.expenses.push(-bucket.expenses);
            trend.net_profit.push(bucket.net_profit);
        }
        trend
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest revenue or expense value, used to scale charts
    pub fn peak(&self) -> Money {
        self.revenue
            .iter()
            .chain(self.expenses.iter())
            .copied()
            .max()
            .unwrap_or_default()
    }

    /// Format the trend as a table with optional bar chart
    pub fn format_terminal(&self, symbol: &str, with_chart: bool) -> String {
        let mut output = String::new();

        output.push_str("Monthly Trend\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No profit or loss activity recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>18} {:>18} {:>18}\n",
            "Month", "Revenue", "Expenses", "Net Profit"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for i in 0..self.len() {
            output.push_str(&format!(
                "{:<10} {:>18} {:>18} {:>18}\n",
                self.labels[i],
                self.revenue[i].format_with_symbol(symbol),
                self.expenses[i].format_with_symbol(symbol),
                self.net_profit[i].format_with_symbol(symbol),
            ));
        }

        if with_chart {
            let peak = self.peak().as_f64();
            output.push('\n');
            for i in 0..self.len() {
                output.push_str(&format!(
                    "{:<10} R {}\n{:<10} E {}\n",
                    self.labels[i],
                    crate::display::report::format_bar(self.revenue[i].as_f64(), peak, 40),
                    "",
                    crate::display::report::format_bar(self.expenses[i].as_f64(), peak, 40),
                ));
            }
        }

        output
    }

    /// Export the trend to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> CashbookResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Month", "Revenue", "Expenses", "Net Profit"])?;

        for i in 0..self.len() {
            csv_writer.write_record([
                self.labels[i].clone(),
                self.revenue[i].to_string(),
                self.expenses[i].to_string(),
                self.net_profit[i].to_string(),
            ])?;
        }

        csv_writer
            .flush()
            .map_err(|e| CashbookError::Export(e.to_string()))?;
        Ok(())
    }
}
