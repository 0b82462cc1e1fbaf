//! Deterministic description-to-category matching.
//!
//! No LLM: lowercase substring rules cover the vocabulary users actually
//! type into a personal-finance form. Evaluation order is the declared
//! table order, so an ambiguous description lands in the first matching
//! category. Keywords are literal; accented forms are listed alongside
//! their unaccented spellings rather than folded.

use crate::category::{ExpenseCategory, GoalCategory, IncomeCategory};

/// Which record kind a piece of text is being classified for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Income,
    Expense,
    Goal,
}

impl Domain {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "receita" | "income" => Some(Domain::Income),
            "despesa" | "expense" => Some(Domain::Expense),
            "sonho" | "meta" | "goal" => Some(Domain::Goal),
            _ => None,
        }
    }
}

const EXPENSE_RULES: &[(ExpenseCategory, &[&str])] = &[
    // "gás" stays accented-only: the bare "gas" would swallow "gasolina"
    // before the Transporte rules get a look.
    (ExpenseCategory::Moradia, &[
        "aluguel", "condomínio", "condominio", "luz", "água", "agua",
        "energia", "gás", "iptu", "internet", "telefone", "faxina",
    ]),
    (ExpenseCategory::Alimentacao, &[
        "mercado", "supermercado", "restaurante", "ifood", "lanche",
        "padaria", "feira", "açougue", "acougue", "alimentação", "alimentacao",
    ]),
    (ExpenseCategory::Transporte, &[
        "uber", "táxi", "taxi", "ônibus", "onibus", "metrô", "metro",
        "combustível", "combustivel", "gasolina", "estacionamento",
        "pedágio", "pedagio", "passagem",
    ]),
    (ExpenseCategory::Saude, &[
        "farmácia", "farmacia", "remédio", "remedio", "médico", "medico",
        "consulta", "dentista", "exame", "plano de saúde", "plano de saude",
    ]),
    (ExpenseCategory::Educacao, &[
        "escola", "faculdade", "curso", "mensalidade", "livro",
        "material escolar", "apostila",
    ]),
    (ExpenseCategory::Lazer, &[
        "cinema", "show", "viagem", "passeio", "festa",
        "netflix", "spotify", "streaming", "jogo", "academia",
    ]),
];

const INCOME_RULES: &[(IncomeCategory, &[&str])] = &[
    (IncomeCategory::Salario, &[
        "salário", "salario", "folha", "holerite", "pagamento mensal",
        "pró-labore", "pro-labore", "13º", "ferias", "férias",
    ]),
    (IncomeCategory::Freelance, &[
        "freela", "freelance", "freelancer", "projeto", "consultoria", "bico",
    ]),
    (IncomeCategory::Investimentos, &[
        "dividendo", "rendimento", "juros", "ações", "acoes", "cdb",
        "tesouro", "investimento", "poupança", "poupanca",
    ]),
    (IncomeCategory::Vendas, &[
        "venda", "vendi", "olx", "enjoei", "brechó", "brecho",
    ]),
];

const GOAL_RULES: &[(GoalCategory, &[&str])] = &[
    (GoalCategory::Viagem, &[
        "viagem", "viajar", "passagem", "intercâmbio", "intercambio",
        "praia", "europa", "disney",
    ]),
    (GoalCategory::Imovel, &[
        "casa", "apartamento", "imóvel", "imovel", "entrada do", "reforma", "terreno",
    ]),
    (GoalCategory::Veiculo, &[
        "carro", "moto", "veículo", "veiculo", "bicicleta",
    ]),
    (GoalCategory::Educacao, &[
        "faculdade", "curso", "mba", "pós-graduação", "pos-graduacao", "estudar",
    ]),
    (GoalCategory::Emergencia, &[
        "emergência", "emergencia", "reserva", "imprevisto",
    ]),
];

fn first_match<C: Copy>(rules: &[(C, &[&str])], text: &str, fallback: C) -> C {
    let t = text.to_lowercase();
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| t.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(fallback)
}

/// Classify an expense description. Empty or unmatched text → Outros.
pub fn classify_expense(text: &str) -> ExpenseCategory {
    first_match(EXPENSE_RULES, text, ExpenseCategory::Outros)
}

/// Classify an income description. Empty or unmatched text → Outros.
pub fn classify_income(text: &str) -> IncomeCategory {
    first_match(INCOME_RULES, text, IncomeCategory::Outros)
}

/// Classify a goal title/description. Empty or unmatched text → Outros.
pub fn classify_goal(text: &str) -> GoalCategory {
    first_match(GOAL_RULES, text, GoalCategory::Outros)
}

/// Label-level dispatch for callers that work across domains (CLI debug
/// command, import fallback).
pub fn classify(domain: Domain, text: &str) -> &'static str {
    match domain {
        Domain::Income => classify_income(text).label(),
        Domain::Expense => classify_expense(text).label(),
        Domain::Goal => classify_goal(text).label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utility_bill_is_housing() {
        assert_eq!(classify_expense("Conta de luz e água"), ExpenseCategory::Moradia);
        assert_eq!(classify(Domain::Expense, "Conta de luz e água"), "Moradia");
    }

    #[test]
    fn unmatched_text_falls_back_to_outros() {
        assert_eq!(classify_expense("xyz123"), ExpenseCategory::Outros);
        assert_eq!(classify(Domain::Income, ""), "Outros");
        assert_eq!(classify_goal("???"), GoalCategory::Outros);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_expense("ALUGUEL de março"), ExpenseCategory::Moradia);
        assert_eq!(classify_income("SALÁRIO"), IncomeCategory::Salario);
    }

    #[test]
    fn accented_keywords_match_literally() {
        assert_eq!(classify_expense("farmácia do bairro"), ExpenseCategory::Saude);
        assert_eq!(classify_expense("farmacia do bairro"), ExpenseCategory::Saude);
        assert_eq!(classify_goal("reserva de emergência"), GoalCategory::Emergencia);
    }

    #[test]
    fn overlap_resolves_to_first_declared_category() {
        // "passagem" appears under both Transporte (expense) and Viagem
        // (goal); within the expense table, a description matching both
        // Moradia and Lazer keywords lands in Moradia.
        assert_eq!(
            classify_expense("internet e streaming do mês"),
            ExpenseCategory::Moradia
        );
        // Earlier category wins even when the later keyword comes first
        // in the text.
        assert_eq!(
            classify_expense("cinema e depois mercado"),
            ExpenseCategory::Alimentacao
        );
    }

    #[test]
    fn income_and_goal_tables() {
        assert_eq!(classify_income("Pagamento freela site"), IncomeCategory::Freelance);
        assert_eq!(classify_income("dividendo FII"), IncomeCategory::Investimentos);
        assert_eq!(classify_goal("Entrada do apartamento"), GoalCategory::Imovel);
        assert_eq!(classify_goal("Viagem para a praia"), GoalCategory::Viagem);
    }

    #[test]
    fn deterministic_output() {
        for _ in 0..3 {
            assert_eq!(classify_expense("uber para o trabalho"), ExpenseCategory::Transporte);
        }
    }

    #[test]
    fn domain_parsing() {
        assert_eq!(Domain::from_str("despesa"), Some(Domain::Expense));
        assert_eq!(Domain::from_str("Income"), Some(Domain::Income));
        assert_eq!(Domain::from_str("sonho"), Some(Domain::Goal));
        assert_eq!(Domain::from_str("nope"), None);
    }
}
