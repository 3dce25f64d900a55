//! Report service
//!
//! Takes a consistent snapshot of the stored transactions and hands it to the
//! derivation engine together with the active classification table.

use crate::error::CashbookResult;
use crate::models::ReportPeriod;
use crate::reports::FinancialReport;
use crate::storage::Storage;

pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Month of the most recent transaction, or the current month when
    /// nothing has been recorded yet
    pub fn default_period(&self) -> CashbookResult<ReportPeriod> {
        let latest = self
            .storage
            .transactions
            .get_all()?
            .iter()
            .map(|t| t.date)
            .max();

        Ok(latest
            .map(ReportPeriod::containing)
            .unwrap_or_else(ReportPeriod::current))
    }

    /// Build every statement for `period`; `None` means no data
    pub fn generate(&self, period: ReportPeriod) -> CashbookResult<Option<FinancialReport>> {
        let snapshot = self.storage.transactions.get_all()?;
        log::debug!(
            "Generating report for {} over {} transactions",
            period,
            snapshot.len()
        );
        Ok(FinancialReport::generate(
            &snapshot,
            self.storage.classifications(),
            period,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CashbookPaths;
    use crate::models::Money;
    use crate::services::{CreateTransactionInput, TransactionService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, day: &str, category: &str, units: i64) {
        TransactionService::new(storage)
            .create(CreateTransactionInput {
                date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
                description: category.to_string(),
                category: category.to_string(),
                amount: Money::from_units(units),
            })
            .unwrap();
    }

    #[test]
    fn test_default_period_follows_latest_transaction() {
        let (_temp, storage) = create_test_storage();
        let service = ReportService::new(&storage);
        assert_eq!(service.default_period().unwrap(), ReportPeriod::current());

        add(&storage, "2023-11-02", "Sales Revenue", 10);
        add(&storage, "2024-02-14", "Sales Revenue", 10);
        assert_eq!(
            service.default_period().unwrap(),
            ReportPeriod::new(2024, 2).unwrap()
        );
    }

    #[test]
    fn test_generate() {
        let (_temp, storage) = create_test_storage();
        let service = ReportService::new(&storage);
        let jan = ReportPeriod::new(2024, 1).unwrap();

        assert!(service.generate(jan).unwrap().is_none());

        add(&storage, "2024-01-05", "Sales Revenue", 1000);
        add(&storage, "2024-01-10", "Rent Expense", 300);

        let report = service.generate(jan).unwrap().unwrap();
        assert_eq!(report.period_report.net_profit, Money::from_units(700));
        assert_eq!(report.cumulative_report.cash_balance(), Money::from_units(700));
    }
}
