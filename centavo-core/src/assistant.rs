//! Keyword-driven financial assistant.
//!
//! Answers free-text questions from a snapshot by matching topic
//! keywords (saldo, gastos, sonhos, receitas, economia), in declared
//! order. Deterministic and side-effect-free; the savings target comes
//! from the caller's rule config.

use crate::aggregate::FinanceSnapshot;
use crate::insight::RuleConfig;

/// Answer a user question against the current snapshot.
pub fn answer(snapshot: &FinanceSnapshot, config: &RuleConfig, question: &str) -> String {
    let q = question.to_lowercase();

    if q.contains("saldo") || q.contains("disponível") || q.contains("disponivel") {
        return if snapshot.available_balance > 0.0 {
            format!(
                "Seu saldo disponível é R$ {:.2}. Você pode investir este valor em seus sonhos!",
                snapshot.available_balance
            )
        } else {
            format!(
                "Seu saldo disponível é R$ {:.2}. Recomendo revisar seus gastos para equilibrar as finanças.",
                snapshot.available_balance
            )
        };
    }

    if q.contains("gasto") || q.contains("despesa") {
        let mut top = snapshot.by_category_ordered();
        top.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        if top.is_empty() {
            return "Você ainda não registrou nenhuma despesa.".to_string();
        }
        let lines: Vec<String> = top
            .iter()
            .take(3)
            .map(|(c, v)| format!("- {}: R$ {:.2}", c.label(), v))
            .collect();
        return format!("Seus principais gastos são:\n{}", lines.join("\n"));
    }

    if q.contains("sonho") || q.contains("meta") {
        let Some(priority) = snapshot.goals.first() else {
            return "Você ainda não cadastrou nenhum sonho. Que tal começar agora?".to_string();
        };
        let base = format!(
            "Seu sonho prioritário é \"{}\" ({:.1}% concluído).",
            priority.goal.title, priority.progress_percent
        );
        return if snapshot.available_balance > 0.0 && priority.remaining_amount > 0.0 {
            format!(
                "{} Você pode investir R$ {:.2} nele!",
                base,
                snapshot.available_balance.min(priority.remaining_amount)
            )
        } else {
            format!("{} Continue economizando para alcançá-lo!", base)
        };
    }

    if q.contains("receita") || q.contains("ganho") {
        return if snapshot.available_balance > 0.0 {
            format!(
                "Sua receita total é R$ {:.2}. Você está conseguindo economizar, parabéns!",
                snapshot.total_income
            )
        } else {
            format!(
                "Sua receita total é R$ {:.2}. Seus gastos estão superando sua receita, vamos trabalhar nisso?",
                snapshot.total_income
            )
        };
    }

    if q.contains("economia") || q.contains("poupar") {
        return match snapshot.savings_rate() {
            None => "Cadastre suas receitas primeiro para eu calcular sua taxa de economia.".to_string(),
            Some(rate) if rate >= config.savings_rate_target => format!(
                "Sua taxa de economia é {:.1}%. Parabéns! Você está acima da meta recomendada de {:.0}%.",
                rate, config.savings_rate_target
            ),
            Some(rate) => format!(
                "Sua taxa de economia é {:.1}%. O ideal é economizar pelo menos {:.0}% da sua renda. Vamos trabalhar para alcançar isso!",
                rate, config.savings_rate_target
            ),
        };
    }

    "Desculpe, não entendi sua pergunta. Você pode me perguntar sobre seu saldo, gastos, receitas, sonhos ou economia!".to_string()
}
