//! Periodic analysis loop: the external scheduler that feeds data
//! snapshots to the pure rule evaluator on a cadence.

use anyhow::Result;
use chrono::Utc;
use std::time::Duration;

use centavo_core::insight::{InsightEvent, InsightKind, evaluate};

use crate::config::Config;
use crate::dashboard::load_snapshot;
use crate::store::Store;

/// Run one analysis pass. Upcoming-bill reminders are only produced at
/// the configured local check hour so the queue isn't drip-fed the same
/// reminder all day; everything else fires on every pass.
pub fn run_pass(store: &Store, config: &Config) -> Result<usize> {
    let snapshot = load_snapshot(store, config)?;
    let budgets = store.budgets()?;
    let insights = evaluate(&snapshot, &budgets, &config.rule_config(), snapshot.today);
    let insights = filter_reminders_outside_check_hour(
        insights,
        config.local_hour(),
        config.watch.bill_check_hour,
    );

    let appended = store.append_notifications(&insights)?;

    let reached: Vec<String> = snapshot
        .goals
        .iter()
        .filter(|p| p.goal.is_reached() && !p.goal.notified)
        .map(|p| p.goal.id.clone())
        .collect();
    store.mark_goals_notified(&reached)?;

    Ok(appended)
}

pub async fn run_watch(store: &Store, config: &Config, once: bool) -> Result<()> {
    let every = Duration::from_secs(config.watch.interval_minutes.max(1) * 60);
    println!(
        "Verificando a cada {} min (contas a vencer às {}h, fuso {}). Ctrl-C para sair.",
        config.watch.interval_minutes.max(1),
        config.watch.bill_check_hour,
        config.watch.timezone
    );

    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        match run_pass(store, config) {
            Ok(appended) => {
                println!(
                    "[{}] análise concluída: {} notificação(ões) nova(s)",
                    Utc::now().format("%Y-%m-%d %H:%M:%S"),
                    appended
                );
            }
            // Keep the loop alive: one bad pass shouldn't kill the watcher.
            Err(err) => eprintln!("análise falhou: {err:#}"),
        }
        if once {
            break;
        }
    }

    Ok(())
}

pub fn filter_reminders_outside_check_hour(
    insights: Vec<InsightEvent>,
    local_hour: u32,
    check_hour: u32,
) -> Vec<InsightEvent> {
    if local_hour == check_hour {
        insights
    } else {
        insights
            .into_iter()
            .filter(|i| i.kind != InsightKind::Reminder)
            .collect()
    }
}
