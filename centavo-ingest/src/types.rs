use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use centavo_core::category::ExpenseCategory;

/// Normalized output of the import parsers, ready to become an
/// ExpenseRecord once the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedExpense {
    pub description: String,
    /// Positive amount in the account currency
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub is_paid: bool,
}

/// Result of one import run. Invalid rows are skipped and counted,
/// never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub rows: Vec<ImportedExpense>,
    pub skipped: usize,
}

impl ImportReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
