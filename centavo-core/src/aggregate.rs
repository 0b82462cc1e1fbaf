//! Pure aggregation over already-loaded record collections.
//!
//! Every function here is total: empty input yields zero/empty output,
//! and no ratio is ever computed against a zero denominator.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::category::ExpenseCategory;
use crate::goals::{GoalProgress, GoalRecord, goals_with_progress, sort_goals_by_urgency};
use crate::records::{ExpenseRecord, IncomeRecord};

pub fn total_income(incomes: &[IncomeRecord]) -> f64 {
    incomes.iter().map(|r| r.amount).sum()
}

/// Sum of all expenses, paid or not.
pub fn total_expense(expenses: &[ExpenseRecord]) -> f64 {
    expenses.iter().map(|r| r.amount).sum()
}

/// Sum of expenses that have actually been paid.
pub fn total_paid_expense(expenses: &[ExpenseRecord]) -> f64 {
    expenses.iter().filter(|r| r.is_paid).map(|r| r.amount).sum()
}

/// Cash actually remaining: income minus *paid* expenses only. Unpaid
/// expenses haven't left the account yet.
pub fn available_balance(incomes: &[IncomeRecord], expenses: &[ExpenseRecord]) -> f64 {
    total_income(incomes) - total_paid_expense(expenses)
}

/// Unpaid expenses due strictly before `today` (day granularity).
pub fn overdue_expenses<'a>(
    expenses: &'a [ExpenseRecord],
    today: NaiveDate,
) -> Vec<&'a ExpenseRecord> {
    expenses.iter().filter(|e| e.is_overdue(today)).collect()
}

pub fn total_overdue(overdue: &[&ExpenseRecord]) -> f64 {
    overdue.iter().map(|e| e.amount).sum()
}

/// Expense totals grouped by category.
pub fn expenses_by_category(expenses: &[ExpenseRecord]) -> HashMap<ExpenseCategory, f64> {
    let mut out: HashMap<ExpenseCategory, f64> = HashMap::new();
    for e in expenses {
        *out.entry(e.category).or_insert(0.0) += e.amount;
    }
    out
}

/// Share of `part` in `total`, in percent. Zero total → 0, never a panic.
pub fn percent_of_total(part: f64, total: f64) -> f64 {
    if total == 0.0 { 0.0 } else { part / total * 100.0 }
}

/// The full derived view of one user's finances at a point in time.
///
/// This is the bundle the insight rules, the assistant, and the
/// dashboard all consume; it carries the expense records themselves so
/// window-based rules (upcoming bills) can be evaluated downstream
/// without another trip to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceSnapshot {
    pub today: NaiveDate,
    pub total_income: f64,
    pub total_expense: f64,
    pub total_paid_expense: f64,
    pub available_balance: f64,
    pub total_overdue: f64,
    pub overdue: Vec<ExpenseRecord>,
    pub by_category: HashMap<ExpenseCategory, f64>,
    /// Sorted by urgency: least funded first.
    pub goals: Vec<GoalProgress>,
    pub expenses: Vec<ExpenseRecord>,
}

impl FinanceSnapshot {
    /// Savings rate in percent; None when there is no income to rate
    /// against (callers skip the rule rather than divide).
    pub fn savings_rate(&self) -> Option<f64> {
        if self.total_income == 0.0 {
            None
        } else {
            Some((self.total_income - self.total_expense) / self.total_income * 100.0)
        }
    }

    /// Category totals in the fixed declaration order, for deterministic
    /// iteration (HashMap order is not reproducible).
    pub fn by_category_ordered(&self) -> Vec<(ExpenseCategory, f64)> {
        ExpenseCategory::ALL
            .into_iter()
            .filter_map(|c| self.by_category.get(&c).map(|v| (c, *v)))
            .collect()
    }

    /// Largest-spend category. Only a strictly greater sum displaces the
    /// current best, so ties resolve to declaration order.
    pub fn top_category(&self) -> Option<(ExpenseCategory, f64)> {
        self.by_category_ordered()
            .into_iter()
            .fold(None, |best, cur| match best {
                Some(b) if cur.1 <= b.1 => Some(b),
                _ => Some(cur),
            })
    }
}

/// Build the combined snapshot for a user's records.
pub fn snapshot(
    incomes: &[IncomeRecord],
    expenses: &[ExpenseRecord],
    goals: &[GoalRecord],
    today: NaiveDate,
) -> FinanceSnapshot {
    let overdue_refs = overdue_expenses(expenses, today);
    let total_overdue = total_overdue(&overdue_refs);
    let overdue: Vec<ExpenseRecord> = overdue_refs.into_iter().cloned().collect();

    FinanceSnapshot {
        today,
        total_income: total_income(incomes),
        total_expense: total_expense(expenses),
        total_paid_expense: total_paid_expense(expenses),
        available_balance: available_balance(incomes, expenses),
        total_overdue,
        overdue,
        by_category: expenses_by_category(expenses),
        goals: sort_goals_by_urgency(goals_with_progress(goals)),
        expenses: expenses.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::IncomeCategory;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn income(amount: f64) -> IncomeRecord {
        IncomeRecord::new("r1", amount, "Salário", IncomeCategory::Salario, d(2024, 3, 1))
    }

    fn expense(id: &str, amount: f64, paid: bool, date: NaiveDate) -> ExpenseRecord {
        let e = ExpenseRecord::new(id, amount, "despesa", ExpenseCategory::Outros, date);
        if paid { e.paid() } else { e }
    }

    #[test]
    fn totals_on_empty_input_are_zero() {
        assert_eq!(total_income(&[]), 0.0);
        assert_eq!(total_expense(&[]), 0.0);
        assert_eq!(total_paid_expense(&[]), 0.0);
        assert_eq!(available_balance(&[], &[]), 0.0);
        assert!(expenses_by_category(&[]).is_empty());
    }

    #[test]
    fn available_balance_counts_paid_only() {
        let incomes = vec![income(1000.0)];
        let expenses = vec![
            expense("e1", 500.0, true, d(2024, 3, 5)),
            expense("e2", 300.0, false, d(2024, 3, 20)),
        ];
        // 1000 - 500 paid, not 1000 - 800
        assert_eq!(available_balance(&incomes, &expenses), 500.0);
        assert_eq!(total_expense(&expenses), 800.0);
    }

    #[test]
    fn percent_of_total_zero_guard() {
        assert_eq!(percent_of_total(250.0, 0.0), 0.0);
        assert_eq!(percent_of_total(0.0, 0.0), 0.0);
        assert!((percent_of_total(250.0, 1000.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn overdue_day_boundary() {
        let today = d(2024, 3, 15);
        let expenses = vec![
            expense("yesterday", 10.0, false, d(2024, 3, 14)),
            expense("today", 10.0, false, d(2024, 3, 15)),
            expense("paid", 10.0, true, d(2024, 3, 14)),
        ];
        let overdue = overdue_expenses(&expenses, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "yesterday");
        assert_eq!(total_overdue(&overdue), 10.0);
    }

    #[test]
    fn by_category_groups_sums() {
        let expenses = vec![
            ExpenseRecord::new("e1", 100.0, "mercado", ExpenseCategory::Alimentacao, d(2024, 3, 1)),
            ExpenseRecord::new("e2", 50.0, "padaria", ExpenseCategory::Alimentacao, d(2024, 3, 2)),
            ExpenseRecord::new("e3", 700.0, "aluguel", ExpenseCategory::Moradia, d(2024, 3, 3)),
        ];
        let map = expenses_by_category(&expenses);
        assert_eq!(map[&ExpenseCategory::Alimentacao], 150.0);
        assert_eq!(map[&ExpenseCategory::Moradia], 700.0);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let incomes = vec![income(2000.0)];
        let expenses = vec![
            expense("e1", 300.0, true, d(2024, 3, 1)),
            expense("e2", 200.0, false, d(2024, 3, 10)),
        ];
        let today = d(2024, 3, 15);
        let a = snapshot(&incomes, &expenses, &[], today);
        let b = snapshot(&incomes, &expenses, &[], today);
        assert_eq!(a, b);
    }

    #[test]
    fn savings_rate_guard() {
        let snap = snapshot(&[], &[expense("e1", 100.0, true, d(2024, 3, 1))], &[], d(2024, 3, 15));
        assert_eq!(snap.savings_rate(), None);

        let snap = snapshot(
            &[income(1000.0)],
            &[expense("e1", 900.0, true, d(2024, 3, 1))],
            &[],
            d(2024, 3, 15),
        );
        assert!((snap.savings_rate().unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn top_category_prefers_declaration_order_on_tie() {
        let expenses = vec![
            ExpenseRecord::new("e1", 100.0, "cinema", ExpenseCategory::Lazer, d(2024, 3, 1)),
            ExpenseRecord::new("e2", 100.0, "mercado", ExpenseCategory::Alimentacao, d(2024, 3, 2)),
        ];
        let snap = snapshot(&[], &expenses, &[], d(2024, 3, 15));
        // Equal sums: Alimentação is declared before Lazer.
        assert_eq!(snap.top_category().unwrap().0, ExpenseCategory::Alimentacao);
    }
}
