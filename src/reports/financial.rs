//! Financial report bundle
//!
//! Runs the full derivation for one reporting period: the month's transactions
//! feed the flow statements (profit or loss, cash flows), everything up to the
//! end of the month feeds the position statement and the ratios, and the
//! monthly trend covers the whole history.

use std::io::Write;

use crate::display::report::{double_separator, format_amount, line, ordered_lines, separator};
use crate::error::{CashbookError, CashbookResult};
use crate::models::classification::CASH_ACCOUNT;
use crate::models::{
    CashFlowSection, ClassificationTable, Money, ReportPeriod, StatementKind, Transaction,
};

use super::period::PeriodSlices;
use super::ratios::FinancialRatios;
use super::statements::{AggregatedReport, LineTotals};
use super::trend::MonthlyTrend;

const WIDTH: usize = 65;

/// Which part of the bundle to render or export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSection {
    All,
    ProfitOrLoss,
    FinancialPosition,
    CashFlows,
    Ratios,
    Trend,
}

/// Every statement for one period, ready to display
#[derive(Debug, Clone)]
pub struct FinancialReport {
    pub period: ReportPeriod,
    /// Aggregate of the period's own transactions
    pub period_report: AggregatedReport,
    /// Aggregate of all transactions up to the end of the period
    pub cumulative_report: AggregatedReport,
    pub ratios: FinancialRatios,
    pub trend: MonthlyTrend,
    line_item_order: Vec<String>,
    account_order: Vec<String>,
}

impl FinancialReport {
    /// Generate the bundle, or `None` when the period has no data at all
    pub fn generate(
        transactions: &[Transaction],
        table: &ClassificationTable,
        period: ReportPeriod,
    ) -> Option<Self> {
        let slices = PeriodSlices::select(transactions, period);
        if slices.is_empty() {
            log::debug!("No transactions on or before {}", period);
            return None;
        }

        let period_report = AggregatedReport::from_transactions(slices.period_slice, table);
        let cumulative_report =
            AggregatedReport::from_transactions(slices.cumulative_slice, table);
        let ratios = FinancialRatios::from_report(&cumulative_report);
        let trend = MonthlyTrend::from_transactions(transactions, table);

        let line_item_order = table
            .line_items(StatementKind::ProfitAndLoss)
            .into_iter()
            .map(String::from)
            .collect();

        let mut account_order = vec![CASH_ACCOUNT.to_string()];
        account_order.extend(table.accounts().into_iter().map(String::from));

        Some(Self {
            period,
            period_report,
            cumulative_report,
            ratios,
            trend,
            line_item_order,
            account_order,
        })
    }

    /// Format one section (or all of them) for terminal display
    pub fn format_terminal(&self, section: ReportSection, symbol: &str, with_chart: bool) -> String {
        match section {
            ReportSection::ProfitOrLoss => self.format_profit_or_loss(symbol),
            ReportSection::FinancialPosition => self.format_financial_position(symbol),
            ReportSection::CashFlows => self.format_cash_flows(symbol),
            ReportSection::Ratios => self.ratios.format_terminal(),
            ReportSection::Trend => self.trend.format_terminal(symbol, with_chart),
            ReportSection::All => [
                self.format_profit_or_loss(symbol),
                self.format_financial_position(symbol),
                self.format_cash_flows(symbol),
                self.ratios.format_terminal(),
                self.trend.format_terminal(symbol, with_chart),
            ]
            .join("\n"),
        }
    }

    fn format_profit_or_loss(&self, symbol: &str) -> String {
        let report = &self.period_report;
        let mut output = String::new();

        output.push_str("Statement of Profit or Loss\n");
        output.push_str(&format!("Period: {}\n", self.period));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');

        if report.sopl.is_empty() {
            output.push_str("No profit or loss activity in this period.\n");
        }
        for (name, amount) in ordered_lines(&report.sopl, &self.line_item_order) {
            output.push_str(&line(name, amount, symbol, 0));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&line("Net Profit", report.net_profit, symbol, 0));

        if report.excluded_count > 0 {
            output.push_str(&format!(
                "\nNote: {} transaction(s) excluded (unclassified category or invalid amount)\n",
                report.excluded_count
            ));
        }

        output
    }

    fn format_financial_position(&self, symbol: &str) -> String {
        let report = &self.cumulative_report;
        let check = report.balance_check();
        let mut output = String::new();

        output.push_str("Statement of Financial Position\n");
        output.push_str(&format!("As at end of {}\n", self.period));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');

        self.push_section(&mut output, "Assets", &report.sofp.assets, symbol);
        output.push_str(&line("Total Assets", check.total_assets, symbol, 0));
        output.push('\n');

        self.push_section(&mut output, "Liabilities", &report.sofp.liabilities, symbol);
        output.push_str(&line("Total Liabilities", check.total_liabilities, symbol, 0));
        output.push('\n');

        self.push_section(&mut output, "Equity", &report.sofp.equity, symbol);
        output.push_str(&line("Retained Earnings", report.net_profit, symbol, 2));
        output.push_str(&line("Total Equity", check.total_equity, symbol, 0));

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&line(
            "Total Liabilities & Equity",
            check.total_liabilities + check.total_equity,
            symbol,
            0,
        ));

        if !check.is_balanced() {
            output.push_str(&format!(
                "\nWarning: statement does not balance (difference {})\n",
                format_amount(check.difference, symbol)
            ));
        }

        output
    }

    fn format_cash_flows(&self, symbol: &str) -> String {
        let socf = &self.period_report.socf;
        let mut output = String::new();

        output.push_str("Statement of Cash Flows\n");
        output.push_str(&format!("Period: {}\n", self.period));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');

        for section in CashFlowSection::all() {
            self.push_section(&mut output, &section.to_string(), socf.section(section), symbol);
            output.push_str(&line(
                &format!("Net cash from {}", section.to_string().to_lowercase()),
                socf.section_total(section),
                symbol,
                0,
            ));
            output.push('\n');
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&line("Net change in cash", socf.net_cash_flow(), symbol, 0));
        output.push_str(&line(
            "Closing cash balance",
            self.cumulative_report.cash_balance(),
            symbol,
            0,
        ));

        output
    }

    fn push_section(&self, output: &mut String, title: &str, lines: &LineTotals, symbol: &str) {
        output.push_str(title);
        output.push('\n');
        for (name, amount) in ordered_lines(lines, &self.account_order) {
            output.push_str(&line(name, amount, symbol, 2));
        }
    }

    /// `(section, line, amount)` rows for spreadsheet export
    pub fn rows(&self, section: ReportSection) -> Vec<(String, String, String)> {
        let mut rows = Vec::new();
        let include = |s: ReportSection| section == ReportSection::All || section == s;

        if include(ReportSection::ProfitOrLoss) {
            let report = &self.period_report;
            for (name, amount) in ordered_lines(&report.sopl, &self.line_item_order) {
                rows.push(money_row("Profit or Loss", name, amount));
            }
            rows.push(money_row("Profit or Loss", "Net Profit", report.net_profit));
        }

        if include(ReportSection::FinancialPosition) {
            let report = &self.cumulative_report;
            let check = report.balance_check();
            for (title, lines) in [
                ("Assets", &report.sofp.assets),
                ("Liabilities", &report.sofp.liabilities),
                ("Equity", &report.sofp.equity),
            ] {
                for (name, amount) in ordered_lines(lines, &self.account_order) {
                    rows.push(money_row(title, name, amount));
                }
            }
            rows.push(money_row("Equity", "Retained Earnings", report.net_profit));
            rows.push(money_row("Totals", "Total Assets", check.total_assets));
            rows.push(money_row("Totals", "Total Liabilities", check.total_liabilities));
            rows.push(money_row("Totals", "Total Equity", check.total_equity));
        }

        if include(ReportSection::CashFlows) {
            let socf = &self.period_report.socf;
            for flow in CashFlowSection::all() {
                let title = flow.to_string();
                for (name, amount) in ordered_lines(socf.section(flow), &self.account_order) {
                    rows.push(money_row(&title, name, amount));
                }
            }
            rows.push(money_row("Cash Flows", "Net Change in Cash", socf.net_cash_flow()));
            rows.push(money_row(
                "Cash Flows",
                "Closing Cash Balance",
                self.cumulative_report.cash_balance(),
            ));
        }

        if include(ReportSection::Ratios) {
            for (name, value) in [
                ("Profitability", self.ratios.profitability),
                ("Safety", self.ratios.safety),
                ("Asset Efficiency", self.ratios.asset_efficiency),
            ] {
                rows.push(("Ratios".to_string(), name.to_string(), format!("{:.4}", value)));
            }
        }

        rows
    }

    /// Export one section (or all statements and ratios) to CSV
    ///
    /// The trend has its own column layout, so `ReportSection::Trend` writes
    /// the trend table instead of `Section,Line,Amount` rows.
    pub fn export_csv<W: Write>(&self, writer: &mut W, section: ReportSection) -> CashbookResult<()> {
        if section == ReportSection::Trend {
            return self.trend.export_csv(writer);
        }

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Section", "Line", "Amount"])?;
        for (title, label, amount) in self.rows(section) {
            csv_writer.write_record([title, label, amount])?;
        }

        csv_writer
            .flush()
            .map_err(|e| CashbookError::Export(e.to_string()))?;
        Ok(())
    }
}

fn money_row(section: &str, line: &str, amount: Money) -> (String, String, String) {
    (section.to_string(), line.to_string(), amount.to_string())
}
