use anyhow::Result;

use centavo_core::aggregate::FinanceSnapshot;
use centavo_core::percent_of_total;

use crate::config::Config;
use crate::store::Store;

pub fn load_snapshot(store: &Store, config: &Config) -> Result<FinanceSnapshot> {
    let incomes = store.incomes()?;
    let expenses = store.expenses()?;
    let goals = store.goals()?;
    Ok(centavo_core::snapshot(
        &incomes,
        &expenses,
        &goals,
        config.local_today(),
    ))
}

pub fn print_dashboard(snapshot: &FinanceSnapshot) {
    println!("# Resumo — {}\n", snapshot.today.format("%d/%m/%Y"));

    println!("Receitas:         R$ {:>10.2}", snapshot.total_income);
    println!("Despesas:         R$ {:>10.2}", snapshot.total_expense);
    println!("Despesas pagas:   R$ {:>10.2}", snapshot.total_paid_expense);
    println!("Saldo disponível: R$ {:>10.2}", snapshot.available_balance);

    if !snapshot.overdue.is_empty() {
        println!(
            "\nAtrasadas: {} despesa(s), R$ {:.2}",
            snapshot.overdue.len(),
            snapshot.total_overdue
        );
        for e in &snapshot.overdue {
            println!("  - [{}] {} — R$ {:.2} ({})", e.id, e.description, e.amount, e.date);
        }
    }

    let by_category = snapshot.by_category_ordered();
    if !by_category.is_empty() {
        println!("\n## Gastos por categoria\n");
        for (category, total) in by_category {
            println!(
                "  {:<14} R$ {:>10.2}  ({:.1}%)",
                category.label(),
                total,
                percent_of_total(total, snapshot.total_expense)
            );
        }
    }

    if !snapshot.goals.is_empty() {
        println!("\n## Sonhos\n");
        for p in &snapshot.goals {
            println!(
                "  [{}] {} — {:.1}% (R$ {:.2} de R$ {:.2}, faltam R$ {:.2})",
                p.goal.id,
                p.goal.title,
                p.display_percent(),
                p.goal.current_amount,
                p.goal.target_amount,
                p.remaining_clamped()
            );
        }
    }
}
