use anyhow::Result;

use centavo_core::insight::{InsightEvent, InsightKind, evaluate};

use crate::config::Config;
use crate::dashboard::load_snapshot;
use crate::store::Store;

/// Run the rule catalog once: print everything, persist to the
/// notification store, and flip the milestone flag on goals whose
/// "reached" insight just went out.
pub fn run_insights(store: &Store, config: &Config, dry_run: bool) -> Result<Vec<InsightEvent>> {
    let snapshot = load_snapshot(store, config)?;
    let budgets = store.budgets()?;
    let insights = evaluate(&snapshot, &budgets, &config.rule_config(), snapshot.today);

    if insights.is_empty() {
        println!("Nenhum insight para hoje.");
        return Ok(insights);
    }

    for insight in &insights {
        println!("[{}] {} — {}", kind_tag(insight.kind), insight.title, insight.message);
    }

    if !dry_run {
        let appended = store.append_notifications(&insights)?;
        println!("\n{} notificação(ões) nova(s) registrada(s).", appended);

        let reached: Vec<String> = snapshot
            .goals
            .iter()
            .filter(|p| p.goal.is_reached() && !p.goal.notified)
            .map(|p| p.goal.id.clone())
            .collect();
        store.mark_goals_notified(&reached)?;
    }

    Ok(insights)
}

fn kind_tag(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Alert => "alerta",
        InsightKind::Reminder => "lembrete",
        InsightKind::Milestone => "meta",
        InsightKind::Tip => "dica",
        InsightKind::Positive => "positivo",
        InsightKind::Negative => "negativo",
    }
}
