//! Savings goal ("sonho") types and progress math.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::category::GoalCategory;

/// A savings goal with a target amount and deadline ("sonho")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Always positive; validated at creation
    pub target_amount: f64,
    /// Never negative; grows with deposits
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub category: GoalCategory,
    /// 1 = highest, 3 = lowest
    pub priority: u8,
    /// Set once the milestone insight for this goal has been delivered,
    /// so reaching the target only notifies once.
    #[serde(default)]
    pub notified: bool,
    pub created_at: DateTime<Utc>,
}

impl GoalRecord {
    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// A goal paired with its derived progress figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    pub goal: GoalRecord,
    /// current/target * 100, unclamped (over-funded goals exceed 100)
    pub progress_percent: f64,
    /// target - current, sign preserved (negative = over-funded)
    pub remaining_amount: f64,
}

impl GoalProgress {
    /// Display-side clamp: never suggest a negative remaining amount.
    pub fn remaining_clamped(&self) -> f64 {
        self.remaining_amount.max(0.0)
    }

    /// Display-side clamp for progress bars.
    pub fn display_percent(&self) -> f64 {
        self.progress_percent.min(100.0)
    }
}

/// Compute progress for each goal. Total: guards the (invariant-excluded)
/// zero target by reporting 0% rather than dividing.
pub fn goals_with_progress(goals: &[GoalRecord]) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|g| {
            let progress_percent = if g.target_amount > 0.0 {
                g.current_amount / g.target_amount * 100.0
            } else {
                0.0
            };
            GoalProgress {
                remaining_amount: g.target_amount - g.current_amount,
                progress_percent,
                goal: g.clone(),
            }
        })
        .collect()
}

/// Least-funded first; ties broken by the earlier target date.
pub fn sort_goals_by_urgency(mut goals: Vec<GoalProgress>) -> Vec<GoalProgress> {
    goals.sort_by(|a, b| {
        a.progress_percent
            .partial_cmp(&b.progress_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.goal.target_date.cmp(&b.goal.target_date))
    });
    goals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: &str, target: f64, current: f64, date: NaiveDate) -> GoalRecord {
        GoalRecord {
            id: id.into(),
            title: format!("Sonho {id}"),
            description: String::new(),
            target_amount: target,
            current_amount: current,
            target_date: date,
            category: GoalCategory::Viagem,
            priority: 2,
            notified: false,
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn progress_is_unclamped() {
        let progress = goals_with_progress(&[goal("g1", 1000.0, 1200.0, d(2025, 1, 1))]);
        assert!((progress[0].progress_percent - 120.0).abs() < 1e-9);
        assert!((progress[0].remaining_amount + 200.0).abs() < 1e-9);
    }

    #[test]
    fn clamped_views_floor_at_zero_and_cap_at_hundred() {
        let progress = goals_with_progress(&[goal("g1", 1000.0, 1200.0, d(2025, 1, 1))]);
        assert_eq!(progress[0].remaining_clamped(), 0.0);
        assert_eq!(progress[0].display_percent(), 100.0);

        let partial = goals_with_progress(&[goal("g2", 1000.0, 400.0, d(2025, 1, 1))]);
        assert_eq!(partial[0].remaining_clamped(), 600.0);
        assert_eq!(partial[0].display_percent(), 40.0);
    }

    #[test]
    fn urgency_sorts_least_funded_first() {
        let progress = goals_with_progress(&[
            goal("a", 100.0, 80.0, d(2025, 1, 1)),
            goal("b", 100.0, 20.0, d(2025, 1, 1)),
            goal("c", 100.0, 50.0, d(2025, 1, 1)),
        ]);
        let sorted = sort_goals_by_urgency(progress);
        let ids: Vec<_> = sorted.iter().map(|p| p.goal.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn urgency_ties_break_on_earlier_deadline() {
        let progress = goals_with_progress(&[
            goal("later", 100.0, 50.0, d(2025, 6, 1)),
            goal("sooner", 100.0, 50.0, d(2025, 3, 1)),
        ]);
        let sorted = sort_goals_by_urgency(progress);
        assert_eq!(sorted[0].goal.id, "sooner");
    }

    #[test]
    fn empty_goals_is_empty_progress() {
        assert!(goals_with_progress(&[]).is_empty());
        assert!(sort_goals_by_urgency(Vec::new()).is_empty());
    }

    #[test]
    fn zero_target_reports_zero_percent() {
        let progress = goals_with_progress(&[goal("g", 0.0, 50.0, d(2025, 1, 1))]);
        assert_eq!(progress[0].progress_percent, 0.0);
    }
}
