//! Financial health scoring.
//!
//! Starts from 100 and deducts for income over-commitment, blown
//! budgets, and a spending mix light on essentials; each deduction
//! appends a recommendation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use centavo_core::category::ExpenseCategory;
use centavo_core::records::BudgetRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthIndicator {
    #[serde(rename = "otima")]
    Otima,
    #[serde(rename = "boa")]
    Boa,
    #[serde(rename = "regular")]
    Regular,
    #[serde(rename = "atencao")]
    Atencao,
    #[serde(rename = "critica")]
    Critica,
}

impl HealthIndicator {
    pub fn label(&self) -> &'static str {
        match self {
            HealthIndicator::Otima => "Ótima",
            HealthIndicator::Boa => "Boa",
            HealthIndicator::Regular => "Regular",
            HealthIndicator::Atencao => "Atenção",
            HealthIndicator::Critica => "Crítica",
        }
    }

    fn from_score(score: i32) -> Self {
        match score {
            s if s >= 90 => HealthIndicator::Otima,
            s if s >= 70 => HealthIndicator::Boa,
            s if s >= 50 => HealthIndicator::Regular,
            s if s >= 30 => HealthIndicator::Atencao,
            _ => HealthIndicator::Critica,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialHealth {
    pub indicator: HealthIndicator,
    /// 0-100
    pub score: i32,
    pub recommendations: Vec<String>,
}

/// Score the period. All ratio checks are skipped (no deduction) when
/// their denominator is zero.
pub fn health_score(
    total_income: f64,
    total_expense: f64,
    by_category: &HashMap<ExpenseCategory, f64>,
    budgets: &[BudgetRecord],
) -> FinancialHealth {
    let mut score: i32 = 100;
    let mut recommendations = Vec::new();

    // Income commitment
    if total_income > 0.0 {
        let commitment = total_expense / total_income * 100.0;
        if commitment > 80.0 {
            score -= 30;
            recommendations
                .push("Reduza seus gastos mensais para no máximo 80% da sua renda.".to_string());
        }
    }

    // Budgets blown against actual category spending
    let blown = budgets
        .iter()
        .filter(|b| {
            by_category
                .get(&b.category)
                .is_some_and(|spent| *spent > b.limit_amount)
        })
        .count();
    if blown > 0 {
        score -= 10 * blown as i32;
        recommendations.push(format!("Você estourou {blown} orçamento(s) este mês."));
    }

    // Essentials share of spending
    if total_expense > 0.0 {
        let essentials: f64 = by_category
            .iter()
            .filter(|(c, _)| c.is_essential())
            .map(|(_, v)| v)
            .sum();
        if essentials / total_expense * 100.0 < 50.0 {
            score -= 20;
            recommendations.push(
                "Priorize gastos essenciais como moradia, alimentação e saúde.".to_string(),
            );
        }
    }

    let score = score.max(0);
    FinancialHealth {
        indicator: HealthIndicator::from_score(score),
        score,
        recommendations,
    }
}
