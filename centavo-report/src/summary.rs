//! Period summary: totals and per-category shares for a date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use centavo_core::category::ExpenseCategory;
use centavo_core::records::{ExpenseRecord, IncomeRecord};
use centavo_core::{percent_of_total, total_expense, total_income};

/// One category row of a period summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryLine {
    pub category: ExpenseCategory,
    pub total: f64,
    /// Share of the period's total expense, in percent.
    pub percent: f64,
}

/// Aggregated figures for a reporting period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    /// In category declaration order; absent categories are omitted.
    pub categories: Vec<CategoryLine>,
}

/// Summarize records falling inside `[start, end]` (inclusive).
pub fn period_summary(
    incomes: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodSummary {
    let incomes: Vec<IncomeRecord> = incomes
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect();
    let expenses: Vec<ExpenseRecord> = expenses
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect();

    let income_total = total_income(&incomes);
    let expense_total = total_expense(&expenses);

    let categories = ExpenseCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let total: f64 = expenses
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.amount)
                .sum();
            if total > 0.0 {
                Some(CategoryLine {
                    category,
                    total,
                    percent: percent_of_total(total, expense_total),
                })
            } else {
                None
            }
        })
        .collect();

    PeriodSummary {
        start,
        end,
        total_income: income_total,
        total_expense: expense_total,
        net_balance: income_total - expense_total,
        categories,
    }
}
