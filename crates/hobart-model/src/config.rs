//! Forest training configuration.

use crate::error::{ModelError, Result};
use crate::split::SplitCriterion;
use serde::{Deserialize, Serialize};

/// How many candidate features each split considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// Square root of the feature count, the classification default
    Sqrt,

    /// Base-2 logarithm of the feature count
    Log2,

    /// Every feature
    All,

    /// A fixed count, capped at the feature count
    Count(usize),
}

impl MaxFeatures {
    /// Resolve to a concrete candidate count for `n_features` inputs.
    ///
    /// Always at least 1 so a split can be attempted.
    pub fn resolve(&self, n_features: usize) -> usize {
        let count = match self {
            Self::Sqrt => (n_features as f64).sqrt().floor() as usize,
            Self::Log2 => (n_features as f64).log2().floor() as usize,
            Self::All => n_features,
            Self::Count(count) => *count,
        };
        count.clamp(1, n_features.max(1))
    }
}

/// Random forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestConfig {
    /// Number of trees in the ensemble (default: 100)
    pub n_trees: usize,

    /// Depth cap; `None` grows trees until leaves are pure or too small
    /// (default: `None`)
    pub max_depth: Option<usize>,

    /// Minimum samples at a node before a split is attempted (default: 2)
    pub min_samples_split: usize,

    /// Minimum samples each child must keep (default: 1)
    pub min_samples_leaf: usize,

    /// Candidate features per split (default: `Sqrt`)
    pub max_features: MaxFeatures,

    /// Split quality criterion (default: `Gini`)
    pub criterion: SplitCriterion,

    /// Draw a bootstrap sample per tree (default: true)
    pub bootstrap: bool,

    /// Base rng seed; tree `t` uses `seed + t` (default: 42)
    pub seed: u64,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            criterion: SplitCriterion::Gini,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl RandomForestConfig {
    /// Validate parameter ranges.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` naming the offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(ModelError::InvalidConfig(
                "n_trees must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ModelError::InvalidConfig(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(ModelError::InvalidConfig(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(ModelError::InvalidConfig(
                "max_depth must be at least 1 when set".to_string(),
            ));
        }
        if self.max_features == MaxFeatures::Count(0) {
            return Err(ModelError::InvalidConfig(
                "max_features count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = RandomForestConfig::default();
        assert_eq!(config.n_trees, 100);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.min_samples_split, 2);
        assert_eq!(config.min_samples_leaf, 1);
        assert_eq!(config.max_features, MaxFeatures::Sqrt);
        assert_eq!(config.criterion, SplitCriterion::Gini);
        assert!(config.bootstrap);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(MaxFeatures::Sqrt, 9, 3)]
    #[case(MaxFeatures::Sqrt, 34, 5)]
    #[case(MaxFeatures::Log2, 8, 3)]
    #[case(MaxFeatures::All, 14, 14)]
    #[case(MaxFeatures::Count(4), 14, 4)]
    #[case(MaxFeatures::Count(99), 14, 14)]
    #[case(MaxFeatures::Sqrt, 1, 1)]
    #[case(MaxFeatures::Log2, 1, 1)]
    fn test_max_features_resolve(
        #[case] max_features: MaxFeatures,
        #[case] n_features: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(max_features.resolve(n_features), expected);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let no_trees = RandomForestConfig {
            n_trees: 0,
            ..Default::default()
        };
        assert!(no_trees.validate().is_err());

        let bad_split = RandomForestConfig {
            min_samples_split: 1,
            ..Default::default()
        };
        assert!(bad_split.validate().is_err());

        let bad_leaf = RandomForestConfig {
            min_samples_leaf: 0,
            ..Default::default()
        };
        assert!(bad_leaf.validate().is_err());

        let bad_depth = RandomForestConfig {
            max_depth: Some(0),
            ..Default::default()
        };
        assert!(bad_depth.validate().is_err());

        let bad_count = RandomForestConfig {
            max_features: MaxFeatures::Count(0),
            ..Default::default()
        };
        assert!(bad_count.validate().is_err());
    }
}
