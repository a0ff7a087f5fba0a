//! Column taxonomy for the census income dataset.
//!
//! This module fixes the layout of the training file: which columns exist,
//! in what order, and how each one participates in feature construction.
//! Everything downstream (selection masks, encoders, the label vector) is
//! derived from these definitions rather than from hand-maintained index
//! arrays.

pub mod census;

pub use census::{CensusColumn, POSITIVE_LABEL};

use serde::{Deserialize, Serialize};

/// How a column participates in training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Integer-valued attribute passed through as a numeric feature.
    Numeric,

    /// Free-text attribute encoded into indicator features.
    Categorical,

    /// The income class column; never a feature.
    Label,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_partition_the_features() {
        let features = CensusColumn::feature_columns();
        let categorical = CensusColumn::categorical_columns();
        let numeric = CensusColumn::numeric_columns();

        assert_eq!(features.len(), categorical.len() + numeric.len());
        for column in features {
            assert_ne!(column.kind(), ColumnKind::Label);
        }
    }
}
