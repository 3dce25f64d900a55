//! Period selection
//!
//! Splits the full transaction history into the slice for one month (feeding
//! the flow statements) and the cumulative slice up to the end of that month
//! (feeding the position statement).

use crate::models::{ReportPeriod, Transaction};

/// Transactions selected for one reporting period
///
/// Borrows from the caller's collection; nothing is copied or mutated.
#[derive(Debug, Clone)]
pub struct PeriodSlices<'a> {
    pub period: ReportPeriod,
    /// Transactions dated within the period's month
    pub period_slice: Vec<&'a Transaction>,
    /// Transactions dated on or before the period's upper bound
    pub cumulative_slice: Vec<&'a Transaction>,
}

impl<'a> PeriodSlices<'a> {
    /// Select the period and cumulative slices for `period`
    pub fn select(transactions: &'a [Transaction], period: ReportPeriod) -> Self {
        let month_key = period.key();
        let upper_bound = cumulative_upper_bound(&period);

        let period_slice = transactions
            .iter()
            .filter(|t| t.month_key() == month_key)
            .collect();

        let cumulative_slice = transactions
            .iter()
            .filter(|t| t.date_key() <= upper_bound)
            .collect();

        Self {
            period,
            period_slice,
            cumulative_slice,
        }
    }

    /// No data for this period: render a "no data" state instead of a report
    pub fn is_empty(&self) -> bool {
        self.period_slice.is_empty() && self.cumulative_slice.is_empty()
    }
}

/// Inclusive upper bound for the cumulative slice: `YYYY-MM-31`
///
/// This is a string bound, not a calendar end-of-month. ISO dates compare
/// lexicographically and no month has more than 31 days, so every real date
/// of the month sorts at or below it. Making this calendar-aware would be a
/// behavior change.
pub fn cumulative_upper_bound(period: &ReportPeriod) -> String {
    format!("{}-31", period.key())
}
