use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use centavo_report::{
    category_trends, goal_completion_forecast, health_score, period_summary,
};

use crate::config::Config;
use crate::store::Store;

/// Month bounds for a "YYYY-MM" key.
fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .with_context(|| format!("invalid month '{month}', expected YYYY-MM"))?;
    let end = match start.checked_add_months(chrono::Months::new(1)) {
        Some(next) => next.pred_opt().unwrap_or(start),
        None => bail!("month out of range: {month}"),
    };
    Ok((start, end))
}

pub fn run_report(store: &Store, config: &Config, month: Option<String>) -> Result<()> {
    let today = config.local_today();
    let month = month.unwrap_or_else(|| centavo_core::month_key(today));
    let (start, end) = month_bounds(&month)?;

    let incomes = store.incomes()?;
    let expenses = store.expenses()?;
    let goals = store.goals()?;
    let budgets = store.budgets()?;

    let summary = period_summary(&incomes, &expenses, start, end);
    println!("# Relatório — {month}\n");
    println!("Receita total:  R$ {:>10.2}", summary.total_income);
    println!("Despesa total:  R$ {:>10.2}", summary.total_expense);
    println!("Saldo líquido:  R$ {:>10.2}", summary.net_balance);

    if !summary.categories.is_empty() {
        println!("\n## Gastos por categoria\n");
        for line in &summary.categories {
            println!(
                "  {:<14} R$ {:>10.2}  ({:.1}%)",
                line.category.label(),
                line.total,
                line.percent
            );
        }
    }

    let trends = category_trends(&expenses);
    if !trends.is_empty() {
        println!("\n## Tendências e previsões\n");
        for t in &trends {
            println!(
                "  {:<14} {:>+7.1}%  próximo mês: R$ {:.2}",
                t.category.label(),
                t.variation_percent,
                t.forecast_next_month
            );
        }
    }

    if !goals.is_empty() {
        println!("\n## Previsão dos sonhos\n");
        for goal in &goals {
            match goal_completion_forecast(goal, today) {
                Some(0) => println!("  {} — concluído!", goal.title),
                Some(months) => println!("  {} — ~{} mes(es) no ritmo atual", goal.title, months),
                None => println!("  {} — sem ritmo de aporte ainda", goal.title),
            }
        }
    }

    // Health is scored on the report month only.
    let month_expenses: Vec<_> = expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .cloned()
        .collect();
    let by_category = centavo_core::expenses_by_category(&month_expenses);
    let month_budgets: Vec<_> = budgets
        .iter()
        .filter(|b| b.month_key == month)
        .cloned()
        .collect();
    let health = health_score(
        summary.total_income,
        summary.total_expense,
        &by_category,
        &month_budgets,
    );

    println!("\n## Saúde financeira\n");
    println!("  Indicador: {} ({}/100)", health.indicator.label(), health.score);
    for rec in &health.recommendations {
        println!("  • {rec}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_inclusive() {
        let (start, end) = month_bounds("2024-03").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

        let (_, feb_end) = month_bounds("2024-02").unwrap();
        assert_eq!(feb_end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn month_bounds_rejects_garbage() {
        assert!(month_bounds("2024").is_err());
        assert!(month_bounds("2024-13").is_err());
        assert!(month_bounds("março").is_err());
    }
}
