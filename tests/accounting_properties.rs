//! Properties of the statement engine over the standard classification table

use chrono::NaiveDate;

use cashbook::models::{
    CashFlowSection, ClassificationEntry, ClassificationTable, Effect, Money, ReportPeriod,
    StatementKind, Transaction,
};
use cashbook::reports::{aggregate, monthly_trend, ratios, FinancialReport, PeriodSlices};

fn txn(date: &str, category: &str, units: i64) -> Transaction {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    Transaction::new(date, format!("{} {}", category, date), category, Money::from_units(units))
}

fn units(n: i64) -> Money {
    Money::from_units(n)
}

/// A year of activity touching every row of the standard table
fn ledger() -> Vec<Transaction> {
    vec![
        txn("2024-01-02", "Capital Injection", 20_000),
        txn("2024-01-03", "Loan Received", 10_000),
        txn("2024-01-05", "Equipment Purchase", 6_000),
        txn("2024-01-10", "Sales Revenue", 4_200),
        txn("2024-01-12", "Service Revenue", 800),
        txn("2024-01-15", "Cost of Goods Sold", 1_900),
        txn("2024-01-31", "Rent Expense", 1_200),
        txn("2024-01-31", "Salaries Expense", 2_500),
        txn("2024-02-01", "Utilities Expense", 180),
        txn("2024-02-03", "Marketing Expense", 350),
        txn("2024-02-10", "Office Supplies", 75),
        txn("2024-02-15", "Interest Income", 12),
        txn("2024-02-20", "Other Income", 40),
        txn("2024-02-28", "Interest Expense", 90),
        txn("2024-03-01", "Tax Expense", 300),
        txn("2024-03-15", "Owner Drawings", 1_000),
        txn("2024-03-20", "Sales Revenue", 5_100),
    ]
}

#[test]
fn aggregation_is_order_independent() {
    let table = ClassificationTable::standard();
    let forward = ledger();
    let mut backward = forward.clone();
    backward.reverse();
    let mut interleaved: Vec<Transaction> = forward.iter().step_by(2).cloned().collect();
    interleaved.extend(forward.iter().skip(1).step_by(2).cloned());

    let expected = aggregate(&forward, &table);
    assert_eq!(aggregate(&backward, &table), expected);
    assert_eq!(aggregate(&interleaved, &table), expected);
}

#[test]
fn aggregation_is_additive_over_disjoint_sets() {
    let table = ClassificationTable::standard();
    let all = ledger();
    let (a, b) = all.split_at(7);

    let combined = aggregate(a, &table) + aggregate(b, &table);
    assert_eq!(combined, aggregate(&all, &table));
}

#[test]
fn accounting_identity_holds_for_standard_table() {
    let table = ClassificationTable::standard();
    let all = ledger();

    for end in 0..=all.len() {
        let report = aggregate(&all[..end], &table);
        let check = report.balance_check();
        assert!(check.is_balanced(), "unbalanced after {} txns: {:?}", end, check);
        assert_eq!(report.net_cash_flow(), report.cash_balance());
    }
}

#[test]
fn scenario_revenue_and_rent() {
    let table = ClassificationTable::standard();
    let txns = vec![
        txn("2024-01-05", "Sales Revenue", 1000),
        txn("2024-01-10", "Rent Expense", 300),
    ];
    let report = aggregate(&txns, &table);

    assert_eq!(report.sopl.len(), 2);
    assert_eq!(report.sopl["Revenue"], units(1000));
    assert_eq!(report.sopl["Operating Expenses"], units(-300));
    assert_eq!(report.net_profit, units(700));
    assert_eq!(report.cash_balance(), units(700));
}

#[test]
fn scenario_equipment_purchase() {
    let table = ClassificationTable::standard();
    let txns = vec![
        txn("2024-01-05", "Sales Revenue", 1000),
        txn("2024-01-10", "Rent Expense", 300),
        txn("2024-01-15", "Equipment Purchase", 500),
    ];
    let report = aggregate(&txns, &table);

    assert_eq!(report.sofp.assets["Equipment"], units(500));
    assert_eq!(report.cash_balance(), units(200));
    assert_eq!(
        report.socf.section(CashFlowSection::Investing)["Equipment"],
        units(-500)
    );
}

#[test]
fn scenario_two_month_trend() {
    let txns = vec![
        txn("2024-01-20", "Sales Revenue", 1000),
        txn("2024-02-20", "Sales Revenue", 1500),
    ];
    let trend = monthly_trend(&txns, &ClassificationTable::standard());

    assert_eq!(trend.labels.len(), 2);
    assert_eq!(trend.revenue, vec![units(1000), units(1500)]);
    assert_eq!(trend.expenses, vec![Money::zero(), Money::zero()]);
}

#[test]
fn scenario_period_boundaries() {
    let txns = vec![
        txn("2024-02-28", "Sales Revenue", 10),
        txn("2024-03-01", "Sales Revenue", 20),
    ];
    let slices = PeriodSlices::select(&txns, ReportPeriod::parse("2024-02").unwrap());

    assert_eq!(slices.period_slice.len(), 1);
    assert_eq!(slices.period_slice[0].date_key(), "2024-02-28");
    assert_eq!(slices.cumulative_slice.len(), 1);
    assert_eq!(slices.cumulative_slice[0].date_key(), "2024-02-28");
}

#[test]
fn unknown_categories_are_excluded_not_fatal() {
    let table = ClassificationTable::standard();
    let mut txns = ledger();
    let baseline = aggregate(&txns, &table);

    txns.push(txn("2024-02-02", "Crypto Winnings", 99_999));
    txns.push(txn("2024-02-03", "sales revenue", 5));
    let report = aggregate(&txns, &table);

    assert_eq!(report.excluded_count, 2);
    assert_eq!(report.sopl, baseline.sopl);
    assert_eq!(report.sofp, baseline.sofp);
    assert_eq!(report.socf, baseline.socf);
}

#[test]
fn empty_input_gives_zero_report() {
    let table = ClassificationTable::standard();
    let none: Vec<Transaction> = Vec::new();
    let report = aggregate(&none, &table);

    assert!(report.sopl.is_empty());
    assert_eq!(report.net_profit, Money::zero());
    assert_eq!(report.cash_balance(), Money::zero());
    assert!(report.balance_check().is_balanced());

    let r = ratios(&report);
    assert_eq!((r.profitability, r.safety, r.asset_efficiency), (0.0, 0.0, 0.0));
    assert!(FinancialReport::generate(&none, &table, ReportPeriod::current()).is_none());
}

#[test]
fn ratio_edge_cases() {
    let table = ClassificationTable::standard();

    // Assets but no liabilities
    let r = ratios(&aggregate(&[txn("2024-01-01", "Capital Injection", 100)], &table));
    assert!(r.safety.is_infinite());
    assert_eq!(r.profitability, 0.0);

    // Revenue only
    let r = ratios(&aggregate(&[txn("2024-01-01", "Sales Revenue", 400)], &table));
    assert_eq!(r.profitability, 1.0);
    assert_eq!(r.asset_efficiency, 1.0);

    // Full ledger to date
    let report = aggregate(&ledger(), &table);
    let r = ratios(&report);
    let expected_safety = report.total_assets().as_f64() / report.total_liabilities().as_f64();
    assert!((r.safety - expected_safety).abs() < 1e-12);
    assert!(r.profitability > 0.0 && r.profitability < 1.0);
}

#[test]
fn position_sections_follow_line_item_text() {
    let table = ClassificationTable::from_entries(vec![
        ClassificationEntry::new(
            "Capital Injection",
            "Owner's Capital",
            StatementKind::Position,
            "Owner Equity",
            Effect::Increase,
            Some(CashFlowSection::Financing),
        ),
        ClassificationEntry::new(
            "Overdraft",
            "Bank Loan",
            StatementKind::Position,
            "Current Liabilities",
            Effect::Increase,
            Some(CashFlowSection::Financing),
        ),
        ClassificationEntry::new(
            "Deposit Paid",
            "Deposits",
            StatementKind::Position,
            "Reserves",
            Effect::Increase,
            None,
        ),
    ])
    .unwrap();

    let report = aggregate(
        &[
            txn("2024-01-01", "Capital Injection", 100),
            txn("2024-01-02", "Overdraft", 40),
            txn("2024-01-03", "Deposit Paid", 7),
        ],
        &table,
    );

    assert_eq!(report.sofp.equity["Owner's Capital"], units(100));
    assert_eq!(report.sofp.liabilities["Bank Loan"], units(40));
    assert!(!report.sofp.assets.contains_key("Deposits"));
    assert!(!report.sofp.liabilities.contains_key("Deposits"));
    assert!(!report.sofp.equity.contains_key("Deposits"));
    assert_eq!(report.cash_balance(), units(140));
}

#[test]
fn report_bundle_uses_period_and_cumulative_slices() {
    let table = ClassificationTable::standard();
    let all = ledger();
    let feb = ReportPeriod::parse("2024-02").unwrap();

    let report = FinancialReport::generate(&all, &table, feb).unwrap();
    let slices = PeriodSlices::select(&all, feb);

    assert_eq!(
        report.period_report,
        aggregate(slices.period_slice.iter().copied(), &table)
    );
    assert_eq!(
        report.cumulative_report,
        aggregate(slices.cumulative_slice.iter().copied(), &table)
    );
    assert_eq!(report.ratios, ratios(&report.cumulative_report));
    assert_eq!(report.trend.labels, vec!["2024-01", "2024-02", "2024-03"]);
}
