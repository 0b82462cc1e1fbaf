//! Rule-based insight generation over a finance snapshot.
//!
//! Pure function of (snapshot, budgets, config, today): every rule in
//! the catalog is evaluated independently, all that match fire, and the
//! result is ordered by a fixed priority ordinal (lower = more urgent;
//! ties keep catalog order). The evaluator validates nothing, since
//! malformed amounts are the record-creation boundary's problem; its
//! only defensive duty is never dividing by zero.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregate::FinanceSnapshot;
use crate::category::ExpenseCategory;
use crate::records::BudgetRecord;

/// Notification flavor, matching the tipos the notification store keeps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsightKind {
    #[serde(rename = "alerta")]
    Alert,
    #[serde(rename = "lembrete")]
    Reminder,
    #[serde(rename = "meta")]
    Milestone,
    #[serde(rename = "dica")]
    Tip,
    #[serde(rename = "positivo")]
    Positive,
    #[serde(rename = "negativo")]
    Negative,
}

/// One generated insight/notification. Ephemeral: persistence and
/// re-delivery suppression belong to the notification sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightEvent {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub related_amount: Option<f64>,
    pub related_category: Option<ExpenseCategory>,
    /// Rule priority ordinal; lower sorts first.
    pub priority: u8,
}

impl InsightEvent {
    pub fn new(
        kind: InsightKind,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: u8,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            related_amount: None,
            related_category: None,
            priority,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.related_amount = Some(amount);
        self
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.related_category = Some(category);
        self
    }
}

/// Caller-supplied thresholds. Nothing here is hardcoded into the rules
/// so the evaluator stays testable and reusable across locales.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleConfig {
    /// Per-category ceiling as percent of total income.
    pub category_limits: Vec<(ExpenseCategory, f64)>,
    /// Ceiling for categories not listed above.
    pub default_category_limit: f64,
    /// Recommended savings rate in percent.
    pub savings_rate_target: f64,
    /// Budget alert percent used when a budget record carries none.
    pub default_alert_percent: f64,
    /// How many days ahead counts as an "upcoming" bill.
    pub upcoming_window_days: i64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            category_limits: vec![
                (ExpenseCategory::Moradia, 30.0),
                (ExpenseCategory::Alimentacao, 20.0),
                (ExpenseCategory::Transporte, 15.0),
                (ExpenseCategory::Lazer, 10.0),
            ],
            default_category_limit: 15.0,
            savings_rate_target: 20.0,
            default_alert_percent: 80.0,
            upcoming_window_days: 5,
        }
    }
}

impl RuleConfig {
    pub fn limit_for(&self, category: ExpenseCategory) -> f64 {
        self.category_limits
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, limit)| *limit)
            .unwrap_or(self.default_category_limit)
    }
}

// Priority ordinals, one per catalog rule.
const PRIO_OVERDUE: u8 = 0;
const PRIO_BUDGET: u8 = 1;
const PRIO_CATEGORY_OVERSPEND: u8 = 2;
const PRIO_UPCOMING: u8 = 3;
const PRIO_SAVINGS_RATE: u8 = 4;
const PRIO_MILESTONE: u8 = 5;
const PRIO_SURPLUS: u8 = 6;
const PRIO_TOP_SPEND: u8 = 7;
const PRIO_MONTH_START: u8 = 8;

/// Evaluate the full rule catalog.
pub fn evaluate(
    snapshot: &FinanceSnapshot,
    budgets: &[BudgetRecord],
    config: &RuleConfig,
    today: NaiveDate,
) -> Vec<InsightEvent> {
    let mut out = Vec::new();

    // 1. Overdue bills
    if !snapshot.overdue.is_empty() {
        out.push(
            InsightEvent::new(
                InsightKind::Alert,
                "Despesas atrasadas",
                format!(
                    "Você tem {} despesa(s) atrasada(s), totalizando R$ {:.2}. Que tal organizarmos isso?",
                    snapshot.overdue.len(),
                    snapshot.total_overdue
                ),
                PRIO_OVERDUE,
            )
            .with_amount(snapshot.total_overdue),
        );
    }

    // 2. Budget thresholds
    for budget in budgets {
        if budget.limit_amount <= 0.0 {
            continue;
        }
        let usage = budget.usage_percent();
        let alert_at = if budget.alert_percent > 0.0 {
            budget.alert_percent
        } else {
            config.default_alert_percent
        };
        if usage >= 100.0 {
            out.push(
                InsightEvent::new(
                    InsightKind::Alert,
                    "Orçamento estourado",
                    format!(
                        "Você ultrapassou o limite de {} em {}: R$ {:.2} de R$ {:.2} ({:.0}%).",
                        budget.category.label(),
                        budget.month_key,
                        budget.current_amount,
                        budget.limit_amount,
                        usage
                    ),
                    PRIO_BUDGET,
                )
                .with_amount(budget.current_amount)
                .with_category(budget.category),
            );
        } else if usage >= alert_at {
            out.push(
                InsightEvent::new(
                    InsightKind::Alert,
                    "Alerta de orçamento",
                    format!(
                        "Você já utilizou {:.0}% do orçamento de {} este mês.",
                        usage,
                        budget.category.label()
                    ),
                    PRIO_BUDGET,
                )
                .with_amount(budget.current_amount)
                .with_category(budget.category),
            );
        }
    }

    // 3. Category overspend (share of income). Skipped without income.
    if snapshot.total_income > 0.0 {
        for (category, sum) in snapshot.by_category_ordered() {
            let share = sum / snapshot.total_income * 100.0;
            let limit = config.limit_for(category);
            if share > limit {
                out.push(
                    InsightEvent::new(
                        InsightKind::Alert,
                        format!("Gasto elevado em {}", category.label()),
                        format!(
                            "Seus gastos com {} representam {:.1}% da sua renda, acima do recomendado de {:.0}%.",
                            category.label().to_lowercase(),
                            share,
                            limit
                        ),
                        PRIO_CATEGORY_OVERSPEND,
                    )
                    .with_amount(sum)
                    .with_category(category),
                );
            }
        }
    }

    // 4. Upcoming bills inside the reminder window
    for expense in &snapshot.expenses {
        if expense.is_paid {
            continue;
        }
        let days = expense.days_until_due(today);
        if (0..=config.upcoming_window_days).contains(&days) {
            out.push(
                InsightEvent::new(
                    InsightKind::Reminder,
                    "Conta próxima do vencimento",
                    format!(
                        "A despesa \"{}\" de R$ {:.2} vence em {} dia(s).",
                        expense.description, expense.amount, days
                    ),
                    PRIO_UPCOMING,
                )
                .with_amount(expense.amount)
                .with_category(expense.category),
            );
        }
    }

    // 5. Savings rate. Skipped without income.
    if let Some(rate) = snapshot.savings_rate() {
        if rate < config.savings_rate_target {
            out.push(
                InsightEvent::new(
                    InsightKind::Negative,
                    "Taxa de economia baixa",
                    format!(
                        "Sua taxa de economia atual é de {:.1}%. O recomendado é economizar pelo menos {:.0}% da sua renda.",
                        rate, config.savings_rate_target
                    ),
                    PRIO_SAVINGS_RATE,
                )
                .with_amount(rate),
            );
        } else {
            out.push(
                InsightEvent::new(
                    InsightKind::Positive,
                    "Boa taxa de economia",
                    format!(
                        "Parabéns! Você está economizando {:.1}% da sua renda, acima do recomendado de {:.0}%.",
                        rate, config.savings_rate_target
                    ),
                    PRIO_SAVINGS_RATE,
                )
                .with_amount(rate),
            );
        }
    }

    // 6. Goal milestones. The `notified` flag is the external dedupe
    // marker; flipping it after delivery is the store's job.
    for progress in &snapshot.goals {
        if progress.goal.is_reached() && !progress.goal.notified {
            out.push(
                InsightEvent::new(
                    InsightKind::Milestone,
                    "Meta atingida! 🎉",
                    format!(
                        "Parabéns! Você atingiu sua meta \"{}\". Que tal definir um novo objetivo?",
                        progress.goal.title
                    ),
                    PRIO_MILESTONE,
                )
                .with_amount(progress.goal.current_amount),
            );
        }
    }

    // 7. Surplus to the least-funded goal
    if snapshot.available_balance > 0.0 {
        if let Some(progress) = snapshot.goals.iter().find(|p| p.remaining_amount > 0.0) {
            let suggested = snapshot.available_balance.min(progress.remaining_amount);
            out.push(
                InsightEvent::new(
                    InsightKind::Tip,
                    "Alocação de saldo disponível",
                    format!(
                        "Você tem R$ {:.2} disponíveis. Sugerimos investir R$ {:.2} no seu sonho \"{}\", que está {:.1}% concluído.",
                        snapshot.available_balance,
                        suggested,
                        progress.goal.title,
                        progress.progress_percent
                    ),
                    PRIO_SURPLUS,
                )
                .with_amount(suggested),
            );
        }
    }

    // 8. Economy tip for the biggest spending category
    if let Some((category, sum)) = snapshot.top_category() {
        if sum > 0.0 {
            out.push(
                InsightEvent::new(
                    InsightKind::Tip,
                    "Dica de economia",
                    format!(
                        "Seu maior gasto foi com {}: R$ {:.2}. {}",
                        category.label().to_lowercase(),
                        sum,
                        economy_tip(category)
                    ),
                    PRIO_TOP_SPEND,
                )
                .with_amount(sum)
                .with_category(category),
            );
        }
    }

    // 9. Month-start planning nudge (driven by the passed date only)
    if today.day() <= 5 {
        out.push(InsightEvent::new(
            InsightKind::Tip,
            "Planejamento mensal",
            "Início do mês é o momento ideal para planejar suas finanças. Quer ajuda para organizar seu orçamento?",
            PRIO_MONTH_START,
        ));
    }

    // Stable: equal priorities keep the catalog order above.
    out.sort_by_key(|i| i.priority);
    out
}

fn economy_tip(category: ExpenseCategory) -> &'static str {
    match category {
        ExpenseCategory::Alimentacao => {
            "Considere fazer uma lista de compras e evitar ir ao mercado com fome."
        }
        ExpenseCategory::Transporte => {
            "Que tal avaliar alternativas como carona compartilhada ou transporte público?"
        }
        ExpenseCategory::Lazer => {
            "Procure por opções gratuitas de entretenimento na sua cidade."
        }
        _ => "Revise seus gastos nesta categoria e identifique oportunidades de economia.",
    }
}
