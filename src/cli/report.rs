//! CLI commands for financial statements

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::parse_period;
use crate::config::Settings;
use crate::error::{CashbookError, CashbookResult};
use crate::reports::ReportSection;
use crate::services::ReportService;
use crate::storage::Storage;

/// Options shared by every report
#[derive(Args, Debug, Clone)]
pub struct ReportOptions {
    /// Reporting month (YYYY-MM); defaults to the month of the latest transaction
    #[arg(short, long)]
    pub period: Option<String>,

    /// Export to a CSV file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Every statement, the ratios and the monthly trend
    All(ReportOptions),
    /// Statement of profit or loss for the month
    Sopl(ReportOptions),
    /// Statement of financial position at the end of the month
    Sofp(ReportOptions),
    /// Statement of cash flows for the month
    Socf(ReportOptions),
    /// Profitability, safety and asset-efficiency ratios to date
    Ratios(ReportOptions),
    /// Revenue, expenses and net profit per month
    Trend(ReportOptions),
}

impl ReportCommands {
    fn split(self) -> (ReportSection, ReportOptions) {
        match self {
            ReportCommands::All(o) => (ReportSection::All, o),
            ReportCommands::Sopl(o) => (ReportSection::ProfitOrLoss, o),
            ReportCommands::Sofp(o) => (ReportSection::FinancialPosition, o),
            ReportCommands::Socf(o) => (ReportSection::CashFlows, o),
            ReportCommands::Ratios(o) => (ReportSection::Ratios, o),
            ReportCommands::Trend(o) => (ReportSection::Trend, o),
        }
    }
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> CashbookResult<()> {
    let (section, options) = cmd.split();
    let service = ReportService::new(storage);

    let period = match options.period {
        Some(p) => parse_period(&p)?,
        None => service.default_period()?,
    };

    let Some(report) = service.generate(period)? else {
        println!("No data for {}: no transactions on or before this month.", period);
        println!("Record one with 'cashbook txn add <amount> <category> <description>'.");
        return Ok(());
    };

    if let Some(path) = options.output {
        let file = File::create(&path).map_err(|e| {
            CashbookError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer, section)?;
        println!("Report for {} exported to: {}", period, path.display());
    } else {
        let with_chart = settings.show_trend_chart;
        println!(
            "{}",
            report.format_terminal(section, &settings.currency_symbol, with_chart)
        );
    }

    Ok(())
}
