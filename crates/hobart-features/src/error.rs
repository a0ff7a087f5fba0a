//! Error types for feature construction.

use thiserror::Error;

/// Result type for feature construction.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors that can occur while building or applying feature transforms.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Invalid selection mask or stage layout
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Input width does not match what the transform was built for
    #[error("Dimension mismatch: expected {expected} columns, got {actual}")]
    DimensionMismatch {
        /// Expected number of columns
        expected: usize,
        /// Actual number of columns
        actual: usize,
    },

    /// Cell value has the wrong type for its stage
    #[error("Type mismatch in column {column}: expected {expected}")]
    TypeMismatch {
        /// Column the value came from
        column: String,
        /// What the stage required
        expected: String,
    },

    /// Cell is empty where a value is required
    #[error("Missing value in column {column} at row {row}")]
    MissingValue {
        /// Column the value came from
        column: String,
        /// Zero-based row index
        row: usize,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
