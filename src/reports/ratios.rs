//! Financial health ratios
//!
//! Three dimensionless scores derived from a cumulative aggregated report.
//! Every division by zero has an explicit fallback value instead of an error.

use serde::Serialize;

use super::statements::AggregatedReport;

/// Health scores for the business to date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialRatios {
    /// Net profit / total revenue
    pub profitability: f64,
    /// Total assets / total liabilities; `+inf` when there are assets but no
    /// liabilities
    pub safety: f64,
    /// Net profit / total assets
    pub asset_efficiency: f64,
}

/// Compute ratios from a cumulative report
pub fn ratios(report: &AggregatedReport) -> FinancialRatios {
    FinancialRatios::from_report(report)
}

impl FinancialRatios {
    pub fn from_report(report: &AggregatedReport) -> Self {
        let net_profit = report.net_profit.as_f64();
        let total_revenue = report.total_revenue().as_f64();
        let total_assets = report.total_assets().as_f64();
        let total_liabilities = report.total_liabilities().as_f64();

        let profitability = if total_revenue > 0.0 {
            net_profit / total_revenue
        } else {
            0.0
        };

        let safety = if total_liabilities > 0.0 {
            total_assets / total_liabilities
        } else if total_assets > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let asset_efficiency = if total_assets > 0.0 {
            net_profit / total_assets
        } else {
            0.0
        };

        Self {
            profitability,
            safety,
            asset_efficiency,
        }
    }

    /// Format the ratios for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Financial Health\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Profitability (margin)",
            format_percent(self.profitability)
        ));
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Safety (assets/liabilities)",
            format_multiple(self.safety)
        ));
        output.push_str(&format!(
            "{:<30} {:>15}\n",
            "Asset efficiency (ROA)",
            format_percent(self.asset_efficiency)
        ));

        output
    }
}

/// Render a ratio as a percentage
pub fn format_percent(value: f64) -> String {
    if value.is_infinite() {
        return "∞".to_string();
    }
    format!("{:.1}%", value * 100.0)
}

/// Render a ratio as a multiple, e.g. `2.50x`; infinity prints as `∞`
pub fn format_multiple(value: f64) -> String {
    if value.is_infinite() {
        return "∞".to_string();
    }
    format!("{:.2}x", value)
}
