//! centavo-report: period summaries, trends, forecasts, and health
//! scoring over centavo-core records.

pub mod health;
pub mod summary;
pub mod trends;

pub use health::{FinancialHealth, HealthIndicator, health_score};
pub use summary::{CategoryLine, PeriodSummary, period_summary};
pub use trends::{
    CategoryTrend, category_trends, forecast_next_month, goal_completion_forecast, monthly_totals,
    trend_variation,
};
