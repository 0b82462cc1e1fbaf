//! End-to-end: import a CSV statement, build core records, aggregate,
//! evaluate rules, and report on the result.

use chrono::NaiveDate;

use centavo_core::category::{ExpenseCategory, IncomeCategory};
use centavo_core::insight::{InsightKind, RuleConfig, evaluate};
use centavo_core::records::{ExpenseRecord, IncomeRecord};
use centavo_core::snapshot;
use centavo_ingest::parse_despesas_reader;
use centavo_report::{health_score, monthly_totals, period_summary, trend_variation};

const STATEMENT: &str = "\
descricao,valor,categoria,data,pago
Aluguel,1200.00,moradia,2024-02-05,true
Mercado,600.00,alimentacao,2024-02-10,true
Aluguel,1200.00,moradia,2024-03-05,true
Mercado,700.00,alimentacao,2024-03-08,true
Conta de luz e água,180.00,servicos,2024-03-12,false
Cinema,60.00,lazer,2024-03-14,false
linha quebrada,abc,lazer,2024-03-14,false
";

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn imported_expenses() -> Vec<ExpenseRecord> {
    let report = parse_despesas_reader(STATEMENT.as_bytes()).unwrap();
    assert_eq!(report.skipped, 1, "the broken line should be skipped");

    report
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut e = ExpenseRecord::new(
                format!("imp-{i:04}"),
                row.amount,
                row.description.clone(),
                row.category,
                row.date,
            );
            e.is_paid = row.is_paid;
            e
        })
        .collect()
}

#[test]
fn import_feeds_aggregation_and_rules() {
    let expenses = imported_expenses();
    assert_eq!(expenses.len(), 6);

    // The utility bill had an unknown raw category and classifies into
    // Moradia off its description.
    let luz = expenses.iter().find(|e| e.description.contains("luz")).unwrap();
    assert_eq!(luz.category, ExpenseCategory::Moradia);

    let incomes = vec![
        IncomeRecord::new("r1", 3000.0, "Salário", IncomeCategory::Salario, d(2024, 3, 1)),
    ];

    let today = d(2024, 3, 15);
    let snap = snapshot(&incomes, &expenses, &[], today);

    // Unpaid bills from 03-12 and 03-14 are overdue on the 15th.
    assert_eq!(snap.overdue.len(), 2);
    assert!((snap.total_overdue - 240.0).abs() < 1e-9);

    let insights = evaluate(&snap, &[], &RuleConfig::default(), today);
    assert_eq!(insights[0].kind, InsightKind::Alert);
    assert!(insights[0].message.contains("2 despesa"));
}

#[test]
fn import_feeds_period_report() {
    let expenses = imported_expenses();
    let incomes = vec![
        IncomeRecord::new("r1", 3000.0, "Salário", IncomeCategory::Salario, d(2024, 3, 1)),
    ];

    let s = period_summary(&incomes, &expenses, d(2024, 3, 1), d(2024, 3, 31));
    // March: 1200 + 700 + 180 + 60
    assert!((s.total_expense - 2140.0).abs() < 1e-9);
    assert_eq!(s.categories[0].category, ExpenseCategory::Moradia);

    // February 1800 → March 2140: +18.9%
    let monthly = monthly_totals(&expenses);
    let variation = trend_variation(&monthly);
    assert!(variation > 18.0 && variation < 20.0);

    let march: Vec<ExpenseRecord> = expenses
        .iter()
        .filter(|e| e.date >= d(2024, 3, 1))
        .cloned()
        .collect();
    let by_category = centavo_core::expenses_by_category(&march);
    let health = health_score(3000.0, s.total_expense, &by_category, &[]);
    // Commitment 71% and essentials-heavy mix: full marks.
    assert_eq!(health.score, 100);
}
