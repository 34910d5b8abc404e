// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for chart construction and interaction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// A required column is absent from a row. `row` is the zero-based data row.
    #[error("missing field '{field}' in row {row}")]
    MissingField { field: String, row: usize },

    #[error("non-numeric value '{value}' for field '{field}' in row {row}")]
    NonNumericValue { field: String, row: usize, value: String },

    #[error("dataset has no data rows")]
    EmptyDataset,

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Internal guard; logged and recovered from, never returned to callers.
    #[error("selection set became empty")]
    EmptySelectionInvariantViolation,

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
