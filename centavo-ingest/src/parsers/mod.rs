pub mod despesas_csv;

pub use despesas_csv::{parse_despesas_csv, parse_despesas_reader, sample_csv};
