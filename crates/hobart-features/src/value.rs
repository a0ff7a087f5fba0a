//! Raw cell values for row-wise prediction.

use serde::{Deserialize, Serialize};

/// One heterogeneous cell of a raw attribute row.
///
/// A fitted pipeline scores records that never pass through a data frame,
/// so raw rows are carried as slices of these values, in attribute order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    /// Numeric cell
    Number(f64),
    /// Raw text cell, untrimmed
    Text(String),
}

impl FeatureValue {
    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(value) => Some(value),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(FeatureValue::from(39i64).as_number(), Some(39.0));
        assert_eq!(FeatureValue::from(" State-gov").as_text(), Some(" State-gov"));
        assert_eq!(FeatureValue::from(1.5).as_text(), None);
        assert_eq!(FeatureValue::from("x").as_number(), None);
    }
}
