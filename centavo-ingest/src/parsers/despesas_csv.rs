//! Parse expense CSV imports into normalized rows.
//!
//! Expected layout (the template offered for download by the app):
//!   descricao,valor,categoria,data,pago
//!   Aluguel,1500.00,moradia,2024-03-01,true
//!
//! Rows with an empty description, a non-positive amount, or a date not
//! in YYYY-MM-DD form are skipped and counted. An unknown category
//! falls back to classifying the description.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::io::Read;
use std::path::Path;

use centavo_core::category::ExpenseCategory;
use centavo_core::classify::classify_expense;

use crate::types::{ImportReport, ImportedExpense};

const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// Parse an expense CSV file.
pub fn parse_despesas_csv(path: impl AsRef<Path>) -> Result<ImportReport> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_despesas_reader(file)
}

/// Parse expense CSV from any reader.
pub fn parse_despesas_reader<R: Read>(reader: R) -> Result<ImportReport> {
    let date_re = Regex::new(DATE_PATTERN)?;

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    let mut header_found = false;

    for result in rdr.records() {
        let record = result?;

        // Skip until the header row (imports sometimes carry BOM or
        // preamble lines before it).
        if !header_found {
            if record
                .get(0)
                .map(|s| s.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case("descricao"))
                .unwrap_or(false)
            {
                header_found = true;
            }
            continue;
        }

        let description = record.get(0).unwrap_or("").trim().trim_matches('"').to_string();
        let amount: f64 = record
            .get(1)
            .unwrap_or("0")
            .trim()
            .parse()
            .unwrap_or(0.0);
        let category_raw = record.get(2).unwrap_or("").trim();
        let date_str = record.get(3).unwrap_or("").trim();
        let is_paid = record
            .get(4)
            .map(|s| s.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if description.is_empty() || amount <= 0.0 || !date_re.is_match(date_str) {
            skipped += 1;
            continue;
        }
        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                // Shape matched but not a real date (e.g. month 13)
                skipped += 1;
                continue;
            }
        };

        let category = ExpenseCategory::from_label(category_raw)
            .unwrap_or_else(|| classify_expense(&description));

        rows.push(ImportedExpense {
            description,
            amount,
            category,
            date,
            is_paid,
        });
    }

    Ok(ImportReport { rows, skipped })
}

/// The CSV template users download before importing.
pub fn sample_csv() -> String {
    [
        "descricao,valor,categoria,data,pago",
        "Aluguel,1500.00,moradia,2024-03-01,true",
        "Mercado,800.00,alimentacao,2024-03-05,false",
        "Internet,150.00,moradia,2024-03-10,false",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_sample_template() {
        let report = parse_despesas_reader(sample_csv().as_bytes()).unwrap();
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.skipped, 0);

        let first = &report.rows[0];
        assert_eq!(first.description, "Aluguel");
        assert_eq!(first.amount, 1500.0);
        assert_eq!(first.category, ExpenseCategory::Moradia);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(first.is_paid);
        assert!(!report.rows[1].is_paid);
    }

    #[test]
    fn invalid_rows_are_skipped_and_counted() {
        let csv = "descricao,valor,categoria,data,pago\n\
                   ,100.00,moradia,2024-03-01,false\n\
                   Mercado,0,alimentacao,2024-03-01,false\n\
                   Mercado,-5,alimentacao,2024-03-01,false\n\
                   Mercado,100.00,alimentacao,01/03/2024,false\n\
                   Mercado,100.00,alimentacao,2024-13-01,false\n\
                   Luz,80.00,moradia,2024-03-02,false\n";
        let report = parse_despesas_reader(csv.as_bytes()).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.skipped, 5);
        assert_eq!(report.rows[0].description, "Luz");
    }

    #[test]
    fn unknown_category_falls_back_to_classification() {
        let csv = "descricao,valor,categoria,data,pago\n\
                   Conta de luz e água,120.00,servicos,2024-03-01,false\n\
                   abcdef,50.00,,2024-03-02,false\n";
        let report = parse_despesas_reader(csv.as_bytes()).unwrap();
        assert_eq!(report.rows[0].category, ExpenseCategory::Moradia);
        assert_eq!(report.rows[1].category, ExpenseCategory::Outros);
    }

    #[test]
    fn accepts_display_label_category() {
        let csv = "descricao,valor,categoria,data,pago\n\
                   Cinema,40.00,Lazer,2024-03-01,false\n";
        let report = parse_despesas_reader(csv.as_bytes()).unwrap();
        assert_eq!(report.rows[0].category, ExpenseCategory::Lazer);
    }

    #[test]
    fn rows_before_header_are_ignored() {
        let csv = "exportado em 2024-03-20\n\
                   \n\
                   descricao,valor,categoria,data,pago\n\
                   Mercado,100.00,alimentacao,2024-03-01,false\n";
        let report = parse_despesas_reader(csv.as_bytes()).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn empty_input_is_empty_report() {
        let report = parse_despesas_reader("".as_bytes()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.skipped, 0);
    }
}
