//! centavo-ingest: expense-import abstractions and the CSV parser.

pub mod parsers;
pub mod types;

pub use parsers::{parse_despesas_csv, parse_despesas_reader, sample_csv};
pub use types::{ImportReport, ImportedExpense};
