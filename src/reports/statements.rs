//! Statement aggregation
//!
//! Turns a flat list of categorized transactions into the three financial
//! statements: profit or loss (SOPL), financial position (SOFP) and cash
//! flows (SOCF), plus the running cash balance.
//!
//! Aggregation is a commutative sum over the input, so the result does not
//! depend on transaction order, and it never fails: transactions whose
//! category is not in the classification table, or whose amount is not
//! positive, contribute nothing.

use std::collections::BTreeMap;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::models::classification::{
    CAPITAL_ACCOUNT, CASH_ACCOUNT, FIXED_ASSET_ACCOUNT, LOAN_ACCOUNT, OWNER_DRAWINGS_ACCOUNT,
};
use crate::models::{
    CashFlowSection, ClassificationEntry, ClassificationTable, Effect, Money, PositionSection,
    StatementKind, Transaction,
};

/// Name-to-amount mapping with default-zero reads
pub type LineTotals = BTreeMap<String, Money>;

fn accumulate(map: &mut LineTotals, key: &str, amount: Money) {
    *map.entry(key.to_string()).or_default() += amount;
}

fn merge_into(target: &mut LineTotals, other: LineTotals) {
    for (key, amount) in other {
        *target.entry(key).or_default() += amount;
    }
}

fn lookup(map: &LineTotals, key: &str) -> Money {
    map.get(key).copied().unwrap_or_default()
}

/// Statement of financial position, keyed by account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionStatement {
    pub assets: LineTotals,
    pub liabilities: LineTotals,
    pub equity: LineTotals,
}

impl PositionStatement {
    pub fn section(&self, section: PositionSection) -> &LineTotals {
        match section {
            PositionSection::Assets => &self.assets,
            PositionSection::Liabilities => &self.liabilities,
            PositionSection::Equity => &self.equity,
        }
    }

    fn section_mut(&mut self, section: PositionSection) -> &mut LineTotals {
        match section {
            PositionSection::Assets => &mut self.assets,
            PositionSection::Liabilities => &mut self.liabilities,
            PositionSection::Equity => &mut self.equity,
        }
    }

    pub fn cash_balance(&self) -> Money {
        lookup(&self.assets, CASH_ACCOUNT)
    }
}

/// Statement of cash flows, keyed by account within each section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub operating: LineTotals,
    pub investing: LineTotals,
    pub financing: LineTotals,
}

impl CashFlowStatement {
    pub fn section(&self, section: CashFlowSection) -> &LineTotals {
        match section {
            CashFlowSection::Operating => &self.operating,
            CashFlowSection::Investing => &self.investing,
            CashFlowSection::Financing => &self.financing,
        }
    }

    fn section_mut(&mut self, section: CashFlowSection) -> &mut LineTotals {
        match section {
            CashFlowSection::Operating => &mut self.operating,
            CashFlowSection::Investing => &mut self.investing,
            CashFlowSection::Financing => &mut self.financing,
        }
    }

    /// Net cash from one section
    pub fn section_total(&self, section: CashFlowSection) -> Money {
        self.section(section).values().sum()
    }

    /// Net change in cash across all sections
    pub fn net_cash_flow(&self) -> Money {
        CashFlowSection::all()
            .iter()
            .map(|s| self.section_total(*s))
            .sum()
    }
}

/// Result of checking `assets == liabilities + equity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceCheck {
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub total_equity: Money,
    /// `assets - (liabilities + equity)`
    pub difference: Money,
}

impl BalanceCheck {
    pub fn is_balanced(&self) -> bool {
        self.difference.is_zero()
    }
}

/// Aggregated statements derived from a set of transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedReport {
    /// Signed totals per profit-or-loss line item
    pub sopl: LineTotals,
    pub sofp: PositionStatement,
    pub socf: CashFlowStatement,
    /// Sum of all signed profit-or-loss values
    pub net_profit: Money,
    /// Transactions that contributed to at least one statement
    pub included_count: usize,
    /// Transactions skipped for an unknown category or out-of-range amount
    pub excluded_count: usize,
}

impl Default for AggregatedReport {
    fn default() -> Self {
        let mut sofp = PositionStatement::default();
        sofp.assets.insert(CASH_ACCOUNT.to_string(), Money::zero());
        Self {
            sopl: LineTotals::new(),
            sofp,
            socf: CashFlowStatement::default(),
            net_profit: Money::zero(),
            included_count: 0,
            excluded_count: 0,
        }
    }
}

/// Aggregate transactions against a classification table
pub fn aggregate<'a, I>(transactions: I, table: &ClassificationTable) -> AggregatedReport
where
    I: IntoIterator<Item = &'a Transaction>,
{
    AggregatedReport::from_transactions(transactions, table)
}

impl AggregatedReport {
    /// Aggregate transactions against a classification table
    pub fn from_transactions<'a, I>(transactions: I, table: &ClassificationTable) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut report = Self::default();
        let mut cash = Money::zero();

        for txn in transactions {
            let Some(entry) = table.get(&txn.category) else {
                log::debug!("Excluding {} ({}): unclassified category", txn.id, txn.category);
                report.excluded_count += 1;
                continue;
            };

            if !txn.has_valid_amount() {
                log::debug!("Excluding {}: amount {} out of range", txn.id, txn.amount);
                report.excluded_count += 1;
                continue;
            }

            report.post(entry, txn.amount);
            cash += cash_movement(entry, txn.amount);
            report.included_count += 1;
        }

        report
            .sofp
            .assets
            .insert(CASH_ACCOUNT.to_string(), cash);

        report
    }

    fn post(&mut self, entry: &ClassificationEntry, amount: Money) {
        match entry.statement {
            StatementKind::ProfitAndLoss => {
                let signed = entry.effect.apply(amount);
                accumulate(&mut self.sopl, &entry.line_item, signed);
                self.net_profit += signed;
            }
            StatementKind::Position => match entry.position_section() {
                Some(PositionSection::Equity) => {
                    accumulate(
                        &mut self.sofp.equity,
                        &entry.account,
                        entry.effect.apply(amount),
                    );
                }
                Some(section) => {
                    accumulate(self.sofp.section_mut(section), &entry.account, amount);
                }
                None => {}
            },
        }

        if let Some(flow) = entry.flow {
            accumulate(
                self.socf.section_mut(flow),
                &entry.account,
                cash_flow_amount(entry, amount),
            );
        }
    }

    /// Signed total of one profit-or-loss line item, zero if absent
    pub fn line_item_total(&self, line_item: &str) -> Money {
        lookup(&self.sopl, line_item)
    }

    /// `Revenue + Other Income`
    pub fn total_revenue(&self) -> Money {
        self.line_item_total("Revenue") + self.line_item_total("Other Income")
    }

    pub fn cash_balance(&self) -> Money {
        self.sofp.cash_balance()
    }

    pub fn total_assets(&self) -> Money {
        self.sofp.assets.values().sum()
    }

    pub fn total_liabilities(&self) -> Money {
        self.sofp.liabilities.values().sum()
    }

    /// Equity accounts plus net profit retained in the business
    pub fn total_equity(&self) -> Money {
        self.sofp.equity.values().sum::<Money>() + self.net_profit
    }

    /// Check the accounting identity; divergence is reported, not corrected
    pub fn balance_check(&self) -> BalanceCheck {
        let total_assets = self.total_assets();
        let total_liabilities = self.total_liabilities();
        let total_equity = self.total_equity();
        BalanceCheck {
            total_assets,
            total_liabilities,
            total_equity,
            difference: total_assets - (total_liabilities + total_equity),
        }
    }

    pub fn net_cash_flow(&self) -> Money {
        self.socf.net_cash_flow()
    }

    /// True when no transaction contributed to any statement
    pub fn is_empty(&self) -> bool {
        self.included_count == 0
    }
}

impl Add for AggregatedReport {
    type Output = Self;

    /// Element-wise sum of every statement bucket
    fn add(mut self, other: Self) -> Self {
        merge_into(&mut self.sopl, other.sopl);
        merge_into(&mut self.sofp.assets, other.sofp.assets);
        merge_into(&mut self.sofp.liabilities, other.sofp.liabilities);
        merge_into(&mut self.sofp.equity, other.sofp.equity);
        merge_into(&mut self.socf.operating, other.socf.operating);
        merge_into(&mut self.socf.investing, other.socf.investing);
        merge_into(&mut self.socf.financing, other.socf.financing);
        self.net_profit += other.net_profit;
        self.included_count += other.included_count;
        self.excluded_count += other.excluded_count;
        self
    }
}

/// Direction of the cash movement as shown on the cash-flow statement
fn cash_flow_amount(entry: &ClassificationEntry, amount: Money) -> Money {
    let outflow = entry.effect == Effect::Decrease
        || entry.account == FIXED_ASSET_ACCOUNT
        || entry.account == OWNER_DRAWINGS_ACCOUNT;

    if outflow {
        -amount
    } else {
        amount
    }
}

/// Effect of one transaction on the running cash balance
///
/// First matching rule wins. Position entries with a positive effect only
/// move cash when they are capital injections or loan receipts.
fn cash_movement(entry: &ClassificationEntry, amount: Money) -> Money {
    if entry.effect == Effect::Increase && entry.statement != StatementKind::Position {
        amount
    } else if entry.effect == Effect::Decrease {
        -amount
    } else if entry.account == FIXED_ASSET_ACCOUNT {
        -amount
    } else if entry.account == CAPITAL_ACCOUNT || entry.account == LOAN_ACCOUNT {
        amount
    } else {
        Money::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(date: &str, category: &str, units: i64) -> Transaction {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Transaction::new(date, category, category, Money::from_units(units))
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_empty_set_yields_zero_report() {
        let txns: Vec<Transaction> = Vec::new();
        let report = aggregate(&txns, &ClassificationTable::standard());
        assert!(report.is_empty());
        assert!(report.sopl.is_empty());
        assert_eq!(report.net_profit, Money::zero());
        assert_eq!(report.cash_balance(), Money::zero());
        assert_eq!(report.total_assets(), Money::zero());
        assert!(report.balance_check().is_balanced());
    }

    #[test]
    fn test_revenue_and_expense() {
        let txns = vec![
            txn("2024-01-05", "Sales Revenue", 1000),
            txn("2024-01-10", "Rent Expense", 300),
        ];
        let report = aggregate(&txns, &ClassificationTable::standard());

        assert_eq!(report.sopl.len(), 2);
        assert_eq!(report.line_item_total("Revenue"), units(1000));
        assert_eq!(report.line_item_total("Operating Expenses"), units(-300));
        assert_eq!(report.net_profit, units(700));
        assert_eq!(report.cash_balance(), units(700));
        assert_eq!(report.socf.operating.get("Sales Revenue"), Some(&units(1000)));
        assert_eq!(report.socf.operating.get("Rent Expense"), Some(&units(-300)));
        assert_eq!(report.included_count, 2);
    }

    #[test]
    fn test_equipment_purchase() {
        let txns = vec![
            txn("2024-01-05", "Sales Revenue", 1000),
            txn("2024-01-10", "Rent Expense", 300),
            txn("2024-01-15", "Equipment Purchase", 500),
        ];
        let report = aggregate(&txns, &ClassificationTable::standard());

        assert_eq!(report.sofp.assets.get("Equipment"), Some(&units(500)));
        assert_eq!(report.cash_balance(), units(200));
        assert_eq!(report.socf.investing.get("Equipment"), Some(&units(-500)));
        assert_eq!(report.net_profit, units(700));
    }

    #[test]
    fn test_financing_flows() {
        let txns = vec![
            txn("2024-01-01", "Capital Injection", 5000),
            txn("2024-01-02", "Loan Received", 2000),
            txn("2024-01-03", "Owner Drawings", 400),
        ];
        let report = aggregate(&txns, &ClassificationTable::standard());

        assert_eq!(report.sofp.equity.get("Owner's Capital"), Some(&units(5000)));
        assert_eq!(report.sofp.equity.get("Owner's Drawings"), Some(&units(-400)));
        assert_eq!(report.sofp.liabilities.get("Bank Loan"), Some(&units(2000)));
        assert_eq!(report.socf.financing.get("Owner's Drawings"), Some(&units(-400)));
        assert_eq!(report.socf.financing.get("Bank Loan"), Some(&units(2000)));
        assert_eq!(report.cash_balance(), units(6600));
        assert!(report.sopl.is_empty());
    }

    #[test]
    fn test_unknown_category_and_bad_amount_are_excluded() {
        let mut zero = txn("2024-01-06", "Sales Revenue", 0);
        zero.amount = Money::zero();
        let mut negative = txn("2024-01-07", "Rent Expense", 1);
        negative.amount = Money::from_cents(-100);

        let txns = vec![
            txn("2024-01-05", "Sales Revenue", 1000),
            txn("2024-01-05", "Lottery Winnings", 9999),
            zero,
            negative,
        ];
        let report = aggregate(&txns, &ClassificationTable::standard());

        assert_eq!(report.line_item_total("Revenue"), units(1000));
        assert_eq!(report.cash_balance(), units(1000));
        assert_eq!(report.sopl.len(), 1);
        assert_eq!(report.included_count, 1);
        assert_eq!(report.excluded_count, 3);
    }

    #[test]
    fn test_cash_overwrites_prior_asset_value() {
        let entries = vec![ClassificationEntry::new(
            "Cash Count",
            CASH_ACCOUNT,
            StatementKind::Position,
            "Current Assets",
            Effect::Increase,
            None,
        )];
        let table = ClassificationTable::from_entries(entries).unwrap();
        let report = aggregate(&[txn("2024-01-01", "Cash Count", 50)], &table);

        // The running balance, not the posted amount, lands under the cash key
        assert_eq!(report.cash_balance(), Money::zero());
        assert_eq!(report.included_count, 1);
    }

    #[test]
    fn test_extended_line_item_labels_route_by_substring() {
        let entries = vec![
            ClassificationEntry::new(
                "Supplier Credit",
                "Trade Payables",
                StatementKind::Position,
                "Current Liabilities",
                Effect::Increase,
                Some(CashFlowSection::Operating),
            ),
            ClassificationEntry::new(
                "Partner Contribution",
                "Partner Capital",
                StatementKind::Position,
                "Partners' Equity",
                Effect::Decrease,
                None,
            ),
            ClassificationEntry::new(
                "Stock Purchase",
                "Inventory",
                StatementKind::Position,
                "Current Assets",
                Effect::Increase,
                None,
            ),
            ClassificationEntry::new(
                "Memo Entry",
                "Memo",
                StatementKind::Position,
                "Off-balance Items",
                Effect::Increase,
                None,
            ),
        ];
        let table = ClassificationTable::from_entries(entries).unwrap();
        let txns = vec![
            txn("2024-01-01", "Supplier Credit", 80),
            txn("2024-01-01", "Partner Contribution", 30),
            txn("2024-01-01", "Stock Purchase", 20),
            txn("2024-01-01", "Memo Entry", 10),
        ];
        let report = aggregate(&txns, &table);

        assert_eq!(report.sofp.liabilities.get("Trade Payables"), Some(&units(80)));
        assert_eq!(report.sofp.equity.get("Partner Capital"), Some(&units(-30)));
        assert_eq!(report.sofp.assets.get("Inventory"), Some(&units(20)));
        assert!(report.sofp.assets.get("Memo").is_none());
        // Flow declared only for the supplier credit
        assert_eq!(report.socf.operating.get("Trade Payables"), Some(&units(80)));
        assert!(report.socf.financing.is_empty());
    }

    #[test]
    fn test_add_is_element_wise() {
        let table = ClassificationTable::standard();
        let a = vec![txn("2024-01-05", "Sales Revenue", 1000)];
        let b = vec![
            txn("2024-01-10", "Rent Expense", 300),
            txn("2024-01-11", "Sales Revenue", 50),
        ];

        let combined = aggregate(&a, &table) + aggregate(&b, &table);
        assert_eq!(combined.line_item_total("Revenue"), units(1050));
        assert_eq!(combined.net_profit, units(750));
        assert_eq!(combined.cash_balance(), units(750));
        assert_eq!(combined.included_count, 3);
    }

    #[test]
    fn test_cash_flow_matches_cash_for_standard_table() {
        let txns = vec![
            txn("2024-01-01", "Capital Injection", 5000),
            txn("2024-01-02", "Sales Revenue", 1200),
            txn("2024-01-03", "Salaries Expense", 700),
            txn("2024-01-04", "Equipment Purchase", 900),
            txn("2024-01-05", "Interest Expense", 25),
            txn("2024-01-06", "Owner Drawings", 100),
        ];
        let report = aggregate(&txns, &ClassificationTable::standard());

        assert_eq!(report.net_cash_flow(), report.cash_balance());
        assert_eq!(
            report.socf.section_total(CashFlowSection::Financing),
            units(5000 - 25 - 100)
        );
        assert!(report.balance_check().is_balanced());
    }

    #[test]
    fn test_balance_check_reports_divergence() {
        // A position asset with no cash rule breaks the identity
        let entries = vec![ClassificationEntry::new(
            "Donated Vehicle",
            "Vehicles",
            StatementKind::Position,
            "Non-current Assets",
            Effect::Increase,
            None,
        )];
        let table = ClassificationTable::from_entries(entries).unwrap();
        let report = aggregate(&[txn("2024-01-01", "Donated Vehicle", 40)], &table);

        let check = report.balance_check();
        assert!(!check.is_balanced());
        assert_eq!(check.difference, units(40));
        assert_eq!(report.sofp.assets.get("Vehicles"), Some(&units(40)));
    }

    #[test]
    fn test_oversized_amounts_are_excluded() {
        let table = ClassificationTable::standard();
        let huge = Money::parse("50000000000000000").unwrap();
        let mut txns = vec![txn("2024-01-05", "Sales Revenue", 10)];
        for day in ["2024-01-06", "2024-01-07"] {
            let mut t = txn(day, "Sales Revenue", 1);
            t.amount = huge;
            txns.push(t);
        }

        let report = aggregate(&txns, &table);
        assert_eq!(report.excluded_count, 2);
        assert_eq!(report.net_profit, units(10));
        assert_eq!(report.cash_balance(), units(10));
    }

    #[test]
    fn test_maximum_amounts_sum_exactly() {
        let table = ClassificationTable::standard();
        let mut txns = Vec::new();
        for day in ["2024-01-06", "2024-01-07", "2024-01-08"] {
            let mut t = txn(day, "Sales Revenue", 1);
            t.amount = Transaction::MAX_AMOUNT;
            assert!(t.validate().is_ok());
            txns.push(t);
        }

        let report = aggregate(&txns, &table);
        assert_eq!(report.excluded_count, 0);
        assert_eq!(report.net_profit.cents(), Transaction::MAX_AMOUNT.cents() * 3);
        assert!(report.balance_check().is_balanced());
    }
}
