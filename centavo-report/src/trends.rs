//! Month-over-month trends and simple forecasts.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use centavo_core::category::ExpenseCategory;
use centavo_core::goals::GoalRecord;
use centavo_core::records::{ExpenseRecord, month_key};

/// Trend figures for one expense category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTrend {
    pub category: ExpenseCategory,
    /// Percent change of the latest month vs the one before (0 with
    /// fewer than two months of history).
    pub variation_percent: f64,
    pub forecast_next_month: f64,
}

/// Expense totals keyed by "YYYY-MM". BTreeMap keeps months sorted,
/// which the variation and forecast math relies on.
pub fn monthly_totals(expenses: &[ExpenseRecord]) -> BTreeMap<String, f64> {
    let mut out: BTreeMap<String, f64> = BTreeMap::new();
    for e in expenses {
        *out.entry(month_key(e.date)).or_insert(0.0) += e.amount;
    }
    out
}

/// Percent change between the last two months. Returns 0 when there is
/// not enough history or the previous month sums to zero.
pub fn trend_variation(monthly: &BTreeMap<String, f64>) -> f64 {
    let values: Vec<f64> = monthly.values().copied().collect();
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let previous = values[n - 2];
    let latest = values[n - 1];
    if previous == 0.0 {
        return 0.0;
    }
    (latest - previous) / previous * 100.0
}

/// Weighted moving average over the last three months (weights
/// 0.5/0.3/0.2, oldest of the window first). With fewer than three
/// months, the latest value stands in; with none, 0.
pub fn forecast_next_month(monthly: &BTreeMap<String, f64>) -> f64 {
    let values: Vec<f64> = monthly.values().copied().collect();
    if values.len() < 3 {
        return values.last().copied().unwrap_or(0.0);
    }
    let window = &values[values.len() - 3..];
    const WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];
    window.iter().zip(WEIGHTS).map(|(v, w)| v * w).sum()
}

/// Per-category trends for the given expenses, in declaration order.
pub fn category_trends(expenses: &[ExpenseRecord]) -> Vec<CategoryTrend> {
    ExpenseCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let in_category: Vec<ExpenseRecord> = expenses
                .iter()
                .filter(|e| e.category == category)
                .cloned()
                .collect();
            if in_category.is_empty() {
                return None;
            }
            let monthly = monthly_totals(&in_category);
            Some(CategoryTrend {
                category,
                variation_percent: trend_variation(&monthly),
                forecast_next_month: forecast_next_month(&monthly),
            })
        })
        .collect()
}

/// Whole months elapsed between two dates (calendar months, not 30-day
/// windows).
fn months_elapsed(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// Estimate how many more months a goal needs, assuming the average
/// monthly contribution since creation keeps up. None when the goal is
/// brand new (no elapsed months) or nothing has been contributed yet;
/// Some(0) when it is already reached.
pub fn goal_completion_forecast(goal: &GoalRecord, as_of: NaiveDate) -> Option<u32> {
    if goal.current_amount >= goal.target_amount {
        return Some(0);
    }
    let elapsed = months_elapsed(goal.created_at.date_naive(), as_of);
    if elapsed <= 0 || goal.current_amount <= 0.0 {
        return None;
    }
    let monthly_pace = goal.current_amount / elapsed as f64;
    let remaining = goal.target_amount - goal.current_amount;
    Some((remaining / monthly_pace).ceil() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use centavo_core::category::GoalCategory;
    use chrono::{DateTime, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn expense(amount: f64, date: NaiveDate) -> ExpenseRecord {
        ExpenseRecord::new("e", amount, "mercado", ExpenseCategory::Alimentacao, date)
    }

    #[test]
    fn monthly_totals_group_and_sort() {
        let monthly = monthly_totals(&[
            expense(100.0, d(2024, 2, 10)),
            expense(50.0, d(2024, 2, 20)),
            expense(200.0, d(2024, 1, 5)),
        ]);
        let keys: Vec<_> = monthly.keys().cloned().collect();
        assert_eq!(keys, vec!["2024-01", "2024-02"]);
        assert_eq!(monthly["2024-02"], 150.0);
    }

    #[test]
    fn variation_compares_last_two_months() {
        let monthly = monthly_totals(&[
            expense(200.0, d(2024, 1, 5)),
            expense(300.0, d(2024, 2, 5)),
        ]);
        assert!((trend_variation(&monthly) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn variation_needs_two_months() {
        let single = monthly_totals(&[expense(200.0, d(2024, 1, 5))]);
        assert_eq!(trend_variation(&single), 0.0);
        assert_eq!(trend_variation(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn forecast_weights_recent_months_most() {
        let monthly = monthly_totals(&[
            expense(100.0, d(2024, 1, 5)),
            expense(200.0, d(2024, 2, 5)),
            expense(300.0, d(2024, 3, 5)),
        ]);
        // 100*0.5 + 200*0.3 + 300*0.2 = 170
        assert!((forecast_next_month(&monthly) - 170.0).abs() < 1e-9);
    }

    #[test]
    fn forecast_with_short_history_uses_latest() {
        let monthly = monthly_totals(&[
            expense(100.0, d(2024, 1, 5)),
            expense(250.0, d(2024, 2, 5)),
        ]);
        assert_eq!(forecast_next_month(&monthly), 250.0);
        assert_eq!(forecast_next_month(&BTreeMap::new()), 0.0);
    }

    fn goal(target: f64, current: f64, created: &str) -> GoalRecord {
        GoalRecord {
            id: "g1".into(),
            title: "Reserva".into(),
            description: String::new(),
            target_amount: target,
            current_amount: current,
            target_date: d(2025, 12, 31),
            category: GoalCategory::Emergencia,
            priority: 1,
            notified: false,
            created_at: DateTime::parse_from_rfc3339(created).unwrap().with_timezone(&Utc),
        }
    }

    #[test]
    fn goal_forecast_from_average_pace() {
        // 4 months elapsed, 800 saved → 200/month; 1200 remaining → 6 months.
        let g = goal(2000.0, 800.0, "2024-01-15T00:00:00Z");
        assert_eq!(goal_completion_forecast(&g, d(2024, 5, 20)), Some(6));
    }

    #[test]
    fn goal_forecast_edges() {
        let reached = goal(1000.0, 1000.0, "2024-01-15T00:00:00Z");
        assert_eq!(goal_completion_forecast(&reached, d(2024, 5, 20)), Some(0));

        let brand_new = goal(1000.0, 100.0, "2024-05-01T00:00:00Z");
        assert_eq!(goal_completion_forecast(&brand_new, d(2024, 5, 20)), None);

        let untouched = goal(1000.0, 0.0, "2024-01-15T00:00:00Z");
        assert_eq!(goal_completion_forecast(&untouched, d(2024, 5, 20)), None);
    }

    #[test]
    fn category_trends_skip_absent_categories() {
        let trends = category_trends(&[
            expense(100.0, d(2024, 1, 5)),
            expense(150.0, d(2024, 2, 5)),
        ]);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].category, ExpenseCategory::Alimentacao);
        assert!((trends[0].variation_percent - 50.0).abs() < 1e-9);
    }
}
