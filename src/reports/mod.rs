//! Reports module for Cashbook
//!
//! The accounting derivation engine. Transactions are split by period,
//! aggregated into the profit-or-loss, financial-position and cash-flow
//! statements, and reduced to health ratios and a monthly trend. Nothing here
//! touches storage or fails on bad input.

pub mod financial;
pub mod period;
pub mod ratios;
pub mod statements;
pub mod trend;

pub use financial::{FinancialReport, ReportSection};
pub use period::PeriodSlices;
pub use ratios::{ratios, FinancialRatios};
pub use statements::{
    aggregate, AggregatedReport, BalanceCheck, CashFlowStatement, LineTotals, PositionStatement,
};
pub use trend::{monthly_trend, MonthlyTrend};
