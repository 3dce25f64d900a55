//! Category classification table
//!
//! Maps a transaction's category key to its accounting treatment: the ledger
//! account it posts to, the statement and line item it rolls into, the sign
//! it carries and the cash-flow section it belongs to.
//!
//! The table is configuration. It is never mutated after construction and
//! can be replaced by a user-edited copy loaded from disk.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::money::Money;

/// Account receiving fixed-asset purchases
pub const FIXED_ASSET_ACCOUNT: &str = "Equipment";

/// Account receiving owner withdrawals
pub const OWNER_DRAWINGS_ACCOUNT: &str = "Owner's Drawings";

/// Account receiving owner capital injections
pub const CAPITAL_ACCOUNT: &str = "Owner's Capital";

/// Account receiving loan proceeds
pub const LOAN_ACCOUNT: &str = "Bank Loan";

/// Asset key under which the running cash balance is reported
pub const CASH_ACCOUNT: &str = "Cash & Bank Balance";

/// Which statement a category posts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Statement of profit or loss
    ProfitAndLoss,
    /// Statement of financial position
    Position,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProfitAndLoss => write!(f, "Profit & Loss"),
            Self::Position => write!(f, "Financial Position"),
        }
    }
}

/// Sign applied to an amount when it affects net profit or equity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Effect {
    Increase,
    Decrease,
}

impl Effect {
    pub fn sign(&self) -> i64 {
        match self {
            Self::Increase => 1,
            Self::Decrease => -1,
        }
    }

    /// Apply the sign to an unsigned amount
    pub fn apply(&self, amount: Money) -> Money {
        match self {
            Self::Increase => amount,
            Self::Decrease => -amount,
        }
    }
}

impl TryFrom<i8> for Effect {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Increase),
            -1 => Ok(Self::Decrease),
            other => Err(format!("effect must be 1 or -1, got {}", other)),
        }
    }
}

impl From<Effect> for i8 {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Increase => 1,
            Effect::Decrease => -1,
        }
    }
}

/// Section of the statement of cash flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowSection {
    Operating,
    Investing,
    Financing,
}

impl CashFlowSection {
    pub fn all() -> [CashFlowSection; 3] {
        [Self::Operating, Self::Investing, Self::Financing]
    }
}

impl fmt::Display for CashFlowSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operating => write!(f, "Operating Activities"),
            Self::Investing => write!(f, "Investing Activities"),
            Self::Financing => write!(f, "Financing Activities"),
        }
    }
}

/// Section of the statement of financial position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionSection {
    Assets,
    Liabilities,
    Equity,
}

impl PositionSection {
    /// Route a line-item label to its section by substring match
    ///
    /// Checked in order Assets, Liabilities, Equity, so extended label
    /// vocabularies ("Current Assets", "Long-term Liabilities", "Owner's
    /// Equity") route without code changes.
    pub fn from_line_item(line_item: &str) -> Option<Self> {
        if line_item.contains("Assets") {
            Some(Self::Assets)
        } else if line_item.contains("Liabilities") {
            Some(Self::Liabilities)
        } else if line_item.contains("Equity") {
            Some(Self::Equity)
        } else {
            None
        }
    }
}

/// Accounting treatment of one category key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    /// Category key as recorded on transactions
    pub category: String,

    /// Canonical ledger account name
    pub account: String,

    pub statement: StatementKind,

    /// Statement section the account rolls into
    pub line_item: String,

    pub effect: Effect,

    /// Cash-flow section, if the category has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<CashFlowSection>,
}

impl ClassificationEntry {
    pub fn new(
        category: impl Into<String>,
        account: impl Into<String>,
        statement: StatementKind,
        line_item: impl Into<String>,
        effect: Effect,
        flow: Option<CashFlowSection>,
    ) -> Self {
        Self {
            category: category.into(),
            account: account.into(),
            statement,
            line_item: line_item.into(),
            effect,
            flow,
        }
    }

    pub fn is_profit_and_loss(&self) -> bool {
        self.statement == StatementKind::ProfitAndLoss
    }

    /// Position-statement section derived from the line-item label
    pub fn position_section(&self) -> Option<PositionSection> {
        PositionSection::from_line_item(&self.line_item)
    }
}

/// Lookup from category key to classification entry
///
/// Entries keep their declaration order, which drives the order line items
/// and accounts are printed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ClassificationEntry>", into = "Vec<ClassificationEntry>")]
pub struct ClassificationTable {
    entries: Vec<ClassificationEntry>,
    index: HashMap<String, usize>,
}

impl ClassificationTable {
    /// Build a table, rejecting blank fields and duplicate category keys
    pub fn from_entries(entries: Vec<ClassificationEntry>) -> Result<Self, ClassificationError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if entry.category.trim().is_empty() {
                return Err(ClassificationError::EmptyField {
                    category: entry.category.clone(),
                    field: "category",
                });
            }
            if entry.account.trim().is_empty() {
                return Err(ClassificationError::EmptyField {
                    category: entry.category.clone(),
                    field: "account",
                });
            }
            if entry.line_item.trim().is_empty() {
                return Err(ClassificationError::EmptyField {
                    category: entry.category.clone(),
                    field: "line_item",
                });
            }
            if index.insert(entry.category.clone(), position).is_some() {
                return Err(ClassificationError::DuplicateCategory(entry.category.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// The built-in chart of categories for a small cash-basis business
    pub fn standard() -> Self {
        use CashFlowSection::{Financing, Investing, Operating};
        use Effect::{Decrease, Increase};
        use StatementKind::{Position, ProfitAndLoss};

        let rows: [(&str, &str, StatementKind, &str, Effect, CashFlowSection); 16] = [
            ("Sales Revenue", "Sales Revenue", ProfitAndLoss, "Revenue", Increase, Operating),
            ("Service Revenue", "Service Revenue", ProfitAndLoss, "Revenue", Increase, Operating),
            ("Interest Income", "Interest Income", ProfitAndLoss, "Other Income", Increase, Operating),
            ("Other Income", "Sundry Income", ProfitAndLoss, "Other Income", Increase, Operating),
            ("Cost of Goods Sold", "Cost of Goods Sold", ProfitAndLoss, "Cost of Sales", Decrease, Operating),
            ("Rent Expense", "Rent Expense", ProfitAndLoss, "Operating Expenses", Decrease, Operating),
            ("Salaries Expense", "Salaries & Wages", ProfitAndLoss, "Operating Expenses", Decrease, Operating),
            ("Utilities Expense", "Utilities", ProfitAndLoss, "Operating Expenses", Decrease, Operating),
            ("Marketing Expense", "Marketing & Advertising", ProfitAndLoss, "Operating Expenses", Decrease, Operating),
            ("Office Supplies", "Office Supplies", ProfitAndLoss, "Operating Expenses", Decrease, Operating),
            ("Interest Expense", "Interest Expense", ProfitAndLoss, "Finance Costs", Decrease, Financing),
            ("Tax Expense", "Income Tax", ProfitAndLoss, "Taxation", Decrease, Operating),
            ("Equipment Purchase", FIXED_ASSET_ACCOUNT, Position, "Non-current Assets", Increase, Investing),
            ("Capital Injection", CAPITAL_ACCOUNT, Position, "Equity", Increase, Financing),
            ("Owner Drawings", OWNER_DRAWINGS_ACCOUNT, Position, "Equity", Decrease, Financing),
            ("Loan Received", LOAN_ACCOUNT, Position, "Non-current Liabilities", Increase, Financing),
        ];

        let entries = rows
            .into_iter()
            .map(|(category, account, statement, line_item, effect, flow)| {
                ClassificationEntry::new(category, account, statement, line_item, effect, Some(flow))
            })
            .collect();

        Self::from_entries(entries).unwrap_or_else(|e| {
            log::error!("Built-in classification table is invalid: {}", e);
            Self::empty()
        })
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Look up a category key; `None` means "exclude from all statements"
    pub fn get(&self, category: &str) -> Option<&ClassificationEntry> {
        self.index.get(category).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    pub fn entries(&self) -> &[ClassificationEntry] {
        &self.entries
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct line items of a statement, in declaration order
    pub fn line_items(&self, statement: StatementKind) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in self.entries.iter().filter(|e| e.statement == statement) {
            if !seen.contains(&entry.line_item.as_str()) {
                seen.push(entry.line_item.as_str());
            }
        }
        seen
    }

    /// Distinct accounts, in declaration order
    pub fn accounts(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.account.as_str()) {
                seen.push(entry.account.as_str());
            }
        }
        seen
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<ClassificationEntry>> for ClassificationTable {
    type Error = ClassificationError;

    fn try_from(entries: Vec<ClassificationEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<ClassificationTable> for Vec<ClassificationEntry> {
    fn from(table: ClassificationTable) -> Self {
        table.entries
    }
}

/// Errors raised while building a classification table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    DuplicateCategory(String),
    EmptyField {
        category: String,
        field: &'static str,
    },
}

impl fmt::Display for ClassificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCategory(key) => write!(f, "Duplicate category key: {}", key),
            Self::EmptyField { category, field } => {
                write!(f, "Category '{}' has an empty {}", category, field)
            }
        }
    }
}

impl std::error::Error for ClassificationError {}
