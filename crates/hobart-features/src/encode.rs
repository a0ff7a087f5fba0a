//! Category to indicator-vector encoding.

use crate::error::Result;
use polars::prelude::Column;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maps category strings to fixed-width indicator vectors.
///
/// Fitting collects the distinct raw values of one text column in sorted
/// order; each value then encodes to a vector with a one at its position.
/// The width is always the distinct-category count, including for binary
/// columns, and a value never seen during fit encodes to all zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    categories: Vec<String>,
}

impl CategoryEncoder {
    /// Fit on the distinct values of an iterator of raw strings.
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = values
            .into_iter()
            .map(|value| value.as_ref().to_string())
            .collect();
        Self {
            categories: distinct.into_iter().collect(),
        }
    }

    /// Fit on the non-null values of a text column.
    ///
    /// # Errors
    /// Returns `FeatureError::Polars` when the column is not a string
    /// column.
    pub fn fit_column(column: &Column) -> Result<Self> {
        let values = column.str()?;
        Ok(Self::fit(values.into_iter().flatten()))
    }

    /// Number of indicator outputs.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// The distinct categories seen during fit, sorted.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Position of a category in the indicator vector, if seen during fit.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|category| category.as_str().cmp(value))
            .ok()
    }

    /// Encode one value into its indicator vector.
    pub fn encode(&self, value: &str) -> Vec<f64> {
        let mut indicator = vec![0.0; self.categories.len()];
        if let Some(position) = self.position(value) {
            indicator[position] = 1.0;
        }
        indicator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_sorts_and_dedups() {
        let encoder = CategoryEncoder::fit([" Private", " State-gov", " Private", " Federal-gov"]);
        assert_eq!(encoder.width(), 3);
        assert_eq!(
            encoder.categories(),
            &[" Federal-gov", " Private", " State-gov"]
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = CategoryEncoder::fit([" Male", " Female"]);
        assert_eq!(encoder.encode(" Female"), vec![1.0, 0.0]);
        assert_eq!(encoder.encode(" Male"), vec![0.0, 1.0]);
        // Same call, same answer
        assert_eq!(encoder.encode(" Female"), encoder.encode(" Female"));
    }

    #[test]
    fn test_binary_column_keeps_width_two() {
        let encoder = CategoryEncoder::fit([" Male", " Female", " Male"]);
        assert_eq!(encoder.width(), 2);
    }

    #[test]
    fn test_unseen_value_encodes_to_zeros() {
        let encoder = CategoryEncoder::fit([" Private", " State-gov"]);
        assert_eq!(encoder.encode(" Never-worked"), vec![0.0, 0.0]);
        assert_eq!(encoder.position(" Never-worked"), None);
    }

    #[test]
    fn test_leading_space_is_significant() {
        let encoder = CategoryEncoder::fit([" Private"]);
        assert_eq!(encoder.encode("Private"), vec![0.0]);
        assert_eq!(encoder.encode(" Private"), vec![1.0]);
    }
}
