//! Closed category sets for expenses, incomes, and savings goals.
//!
//! Labels are fixed enumerations rather than free strings so an
//! unmatched or misspelled category can never fall through silently.
//! Each domain reserves "Outros" as its fallback.

use serde::{Deserialize, Serialize};

/// Expense categories ("despesas")
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    #[serde(rename = "moradia")]
    Moradia,
    #[serde(rename = "alimentacao")]
    Alimentacao,
    #[serde(rename = "transporte")]
    Transporte,
    #[serde(rename = "saude")]
    Saude,
    #[serde(rename = "educacao")]
    Educacao,
    #[serde(rename = "lazer")]
    Lazer,
    #[serde(rename = "outros")]
    Outros,
}

impl ExpenseCategory {
    /// Declared order; also the deterministic iteration order for
    /// per-category reporting.
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::Moradia,
        ExpenseCategory::Alimentacao,
        ExpenseCategory::Transporte,
        ExpenseCategory::Saude,
        ExpenseCategory::Educacao,
        ExpenseCategory::Lazer,
        ExpenseCategory::Outros,
    ];

    /// Display label (accented)
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Moradia => "Moradia",
            ExpenseCategory::Alimentacao => "Alimentação",
            ExpenseCategory::Transporte => "Transporte",
            ExpenseCategory::Saude => "Saúde",
            ExpenseCategory::Educacao => "Educação",
            ExpenseCategory::Lazer => "Lazer",
            ExpenseCategory::Outros => "Outros",
        }
    }

    /// Resolve a stored or user-typed label. Accepts both the display
    /// form and the unaccented slug, case-insensitively.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| {
            c.label().to_lowercase() == s || c.slug() == s
        })
    }

    /// Unaccented storage slug (matches the serde rename)
    pub fn slug(&self) -> &'static str {
        match self {
            ExpenseCategory::Moradia => "moradia",
            ExpenseCategory::Alimentacao => "alimentacao",
            ExpenseCategory::Transporte => "transporte",
            ExpenseCategory::Saude => "saude",
            ExpenseCategory::Educacao => "educacao",
            ExpenseCategory::Lazer => "lazer",
            ExpenseCategory::Outros => "outros",
        }
    }

    /// Categories counted as essential spending for health scoring.
    pub fn is_essential(&self) -> bool {
        matches!(
            self,
            ExpenseCategory::Moradia
                | ExpenseCategory::Alimentacao
                | ExpenseCategory::Saude
                | ExpenseCategory::Transporte
        )
    }
}

/// Income categories ("receitas")
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IncomeCategory {
    #[serde(rename = "salario")]
    Salario,
    #[serde(rename = "freelance")]
    Freelance,
    #[serde(rename = "investimentos")]
    Investimentos,
    #[serde(rename = "vendas")]
    Vendas,
    #[serde(rename = "outros")]
    Outros,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 5] = [
        IncomeCategory::Salario,
        IncomeCategory::Freelance,
        IncomeCategory::Investimentos,
        IncomeCategory::Vendas,
        IncomeCategory::Outros,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IncomeCategory::Salario => "Salário",
            IncomeCategory::Freelance => "Freelance",
            IncomeCategory::Investimentos => "Investimentos",
            IncomeCategory::Vendas => "Vendas",
            IncomeCategory::Outros => "Outros",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            IncomeCategory::Salario => "salario",
            IncomeCategory::Freelance => "freelance",
            IncomeCategory::Investimentos => "investimentos",
            IncomeCategory::Vendas => "vendas",
            IncomeCategory::Outros => "outros",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| {
            c.label().to_lowercase() == s || c.slug() == s
        })
    }
}

/// Goal categories ("sonhos")
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GoalCategory {
    #[serde(rename = "viagem")]
    Viagem,
    #[serde(rename = "imovel")]
    Imovel,
    #[serde(rename = "veiculo")]
    Veiculo,
    #[serde(rename = "educacao")]
    Educacao,
    #[serde(rename = "emergencia")]
    Emergencia,
    #[serde(rename = "outros")]
    Outros,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 6] = [
        GoalCategory::Viagem,
        GoalCategory::Imovel,
        GoalCategory::Veiculo,
        GoalCategory::Educacao,
        GoalCategory::Emergencia,
        GoalCategory::Outros,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GoalCategory::Viagem => "Viagem",
            GoalCategory::Imovel => "Imóvel",
            GoalCategory::Veiculo => "Veículo",
            GoalCategory::Educacao => "Educação",
            GoalCategory::Emergencia => "Emergência",
            GoalCategory::Outros => "Outros",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            GoalCategory::Viagem => "viagem",
            GoalCategory::Imovel => "imovel",
            GoalCategory::Veiculo => "veiculo",
            GoalCategory::Educacao => "educacao",
            GoalCategory::Emergencia => "emergencia",
            GoalCategory::Outros => "outros",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| {
            c.label().to_lowercase() == s || c.slug() == s
        })
    }
}

/// Which record kinds a category definition applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppliesTo {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "both")]
    Both,
}

/// Display metadata for a category, as shown by the frontends.
///
/// The closed enums above are the source of truth for matching; this
/// carries the presentation side (icon name, color, ordering) plus the
/// soft-delete flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryDefinition {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub applies_to: AppliesTo,
    pub display_order: u32,
    pub active: bool,
}

/// Built-in category definitions seeded on first run.
pub fn builtin_categories() -> Vec<CategoryDefinition> {
    let expense = [
        ("moradia", "Moradia", "home", "#22c55e"),
        ("alimentacao", "Alimentação", "utensils", "#f97316"),
        ("transporte", "Transporte", "car", "#ef4444"),
        ("saude", "Saúde", "heart-pulse", "#ec4899"),
        ("educacao", "Educação", "graduation-cap", "#a855f7"),
        ("lazer", "Lazer", "popcorn", "#3b82f6"),
        ("outros", "Outros", "circle-ellipsis", "#6b7280"),
    ];
    let income = [
        ("salario", "Salário", "banknote", "#16a34a"),
        ("freelance", "Freelance", "laptop", "#0ea5e9"),
        ("investimentos", "Investimentos", "trending-up", "#8b5cf6"),
        ("vendas", "Vendas", "shopping-bag", "#f59e0b"),
    ];

    let mut out = Vec::new();
    for (i, (slug, name, icon, color)) in expense.iter().enumerate() {
        out.push(CategoryDefinition {
            id: format!("cat-exp-{slug}"),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            applies_to: if *slug == "outros" { AppliesTo::Both } else { AppliesTo::Expense },
            display_order: i as u32,
            active: true,
        });
    }
    for (i, (slug, name, icon, color)) in income.iter().enumerate() {
        out.push(CategoryDefinition {
            id: format!("cat-inc-{slug}"),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            applies_to: AppliesTo::Income,
            display_order: i as u32,
            active: true,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_accepts_display_and_slug() {
        assert_eq!(ExpenseCategory::from_label("Alimentação"), Some(ExpenseCategory::Alimentacao));
        assert_eq!(ExpenseCategory::from_label("alimentacao"), Some(ExpenseCategory::Alimentacao));
        assert_eq!(ExpenseCategory::from_label("MORADIA"), Some(ExpenseCategory::Moradia));
        assert_eq!(ExpenseCategory::from_label("servicos"), None);
    }

    #[test]
    fn test_essential_categories() {
        assert!(ExpenseCategory::Moradia.is_essential());
        assert!(ExpenseCategory::Saude.is_essential());
        assert!(!ExpenseCategory::Lazer.is_essential());
        assert!(!ExpenseCategory::Outros.is_essential());
    }

    #[test]
    fn test_builtin_categories_active_and_ordered() {
        let cats = builtin_categories();
        assert!(cats.iter().all(|c| c.active));
        let expense: Vec<_> = cats.iter().filter(|c| c.applies_to == AppliesTo::Expense).collect();
        for w in expense.windows(2) {
            assert!(w[0].display_order < w[1].display_order);
        }
    }

    #[test]
    fn test_serde_slug_roundtrip() {
        let json = serde_json::to_string(&ExpenseCategory::Saude).unwrap();
        assert_eq!(json, "\"saude\"");
        let back: ExpenseCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExpenseCategory::Saude);
    }
}
