//! centavo-core: pure computation core for the Centavo finance tracker.
//!
//! Everything in this crate is a stateless, synchronous function over
//! in-memory collections: aggregation, rule-based insights, description
//! classification, and the keyword assistant. Storage and scheduling
//! live in the surrounding crates.

pub mod aggregate;
pub mod assistant;
pub mod category;
pub mod classify;
pub mod goals;
pub mod insight;
pub mod records;

pub use aggregate::{
    FinanceSnapshot, available_balance, expenses_by_category, overdue_expenses, percent_of_total,
    snapshot, total_expense, total_income, total_overdue, total_paid_expense,
};
pub use category::{
    AppliesTo, CategoryDefinition, ExpenseCategory, GoalCategory, IncomeCategory,
    builtin_categories,
};
pub use classify::{Domain, classify, classify_expense, classify_goal, classify_income};
pub use goals::{GoalProgress, GoalRecord, goals_with_progress, sort_goals_by_urgency};
pub use insight::{InsightEvent, InsightKind, RuleConfig, evaluate};
pub use records::{BudgetRecord, ExpenseRecord, IncomeRecord, month_key};
