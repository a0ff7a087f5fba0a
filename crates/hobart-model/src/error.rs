//! Error types for model training and prediction.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur during model training or prediction.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Empty training set
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Matrix has no feature columns
    #[error("Training matrix has no feature columns")]
    NoFeatures,

    /// Labels do not line up with the feature matrix
    #[error("Label count mismatch: {rows} feature rows but {labels} labels")]
    LabelMismatch {
        /// Number of feature rows
        rows: usize,
        /// Number of labels
        labels: usize,
    },

    /// Row width differs from the training width
    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch {
        /// Feature count the forest was trained on
        expected: usize,
        /// Feature count of the presented row
        actual: usize,
    },

    /// Forest has no trees
    #[error("Forest has no trees")]
    EmptyForest,

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
