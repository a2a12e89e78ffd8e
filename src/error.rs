use std::fmt;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Columns a named table is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns {
    pub table: String,
    pub columns: Vec<String>,
}

impl fmt::Display for MissingColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.table, self.columns.join(", "))
    }
}

/// Failures of the data pipeline that callers may want to match on.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("schema mismatch, missing columns ({})", join_missing(.0))]
    MissingColumns(Vec<MissingColumns>),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("join key '{key}' not found in {side} table")]
    MissingKey { key: String, side: &'static str },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

fn join_missing(missing: &[MissingColumns]) -> String {
    missing
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
