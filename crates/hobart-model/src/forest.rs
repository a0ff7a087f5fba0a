//! Random forest ensemble over binary-labelled feature matrices.

use crate::config::RandomForestConfig;
use crate::error::{ModelError, Result};
use crate::tree::DecisionTree;
use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A fitted random forest classifier.
///
/// Trees are grown in parallel but each draws from its own seeded rng,
/// so a given configuration and training set always produce the same
/// forest regardless of thread scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    feature_importances: Vec<f64>,
    config: RandomForestConfig,
}

impl RandomForest {
    /// Fit a forest on a feature matrix and boolean labels.
    ///
    /// # Arguments
    /// * `features` - Row-per-sample matrix of feature values
    /// * `labels` - One label per row, `true` for the positive class
    /// * `config` - Forest hyperparameters
    ///
    /// # Returns
    /// The fitted forest with aggregated feature importances.
    ///
    /// # Errors
    /// Returns an error when the matrix is empty, has no columns, the
    /// label count disagrees with the row count, or the configuration
    /// is invalid.
    pub fn fit(
        features: &ArrayView2<'_, f64>,
        labels: &[bool],
        config: RandomForestConfig,
    ) -> Result<Self> {
        Self::fit_with_progress(features, labels, config, || {})
    }

    /// Fit a forest, invoking `on_tree_done` as each tree finishes.
    ///
    /// The callback runs on worker threads and must be `Sync`.
    ///
    /// # Errors
    /// Same conditions as [`Self::fit`].
    pub fn fit_with_progress<F>(
        features: &ArrayView2<'_, f64>,
        labels: &[bool],
        config: RandomForestConfig,
        on_tree_done: F,
    ) -> Result<Self>
    where
        F: Fn() + Sync,
    {
        let n_rows = features.nrows();
        let n_features = features.ncols();
        if n_rows == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if n_features == 0 {
            return Err(ModelError::NoFeatures);
        }
        if labels.len() != n_rows {
            return Err(ModelError::LabelMismatch {
                rows: n_rows,
                labels: labels.len(),
            });
        }
        config.validate()?;

        let grown: Vec<(DecisionTree, Vec<f64>)> = (0..config.n_trees)
            .into_par_iter()
            .map(|index| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index as u64));
                let rows: Vec<usize> = if config.bootstrap {
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };
                let mut importances = vec![0.0; n_features];
                let tree =
                    DecisionTree::fit(features, labels, rows, &config, &mut rng, &mut importances);
                on_tree_done();
                (tree, importances)
            })
            .collect();

        let mut trees = Vec::with_capacity(grown.len());
        let mut totals = vec![0.0; n_features];
        for (tree, importances) in grown {
            let sum: f64 = importances.iter().sum();
            if sum > 0.0 {
                for (total, value) in totals.iter_mut().zip(&importances) {
                    *total += value / sum;
                }
            }
            trees.push(tree);
        }
        for total in &mut totals {
            *total /= trees.len() as f64;
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            for total in &mut totals {
                *total /= sum;
            }
        }

        Ok(Self {
            trees,
            n_features,
            feature_importances: totals,
            config,
        })
    }

    /// Mean positive-class probability across all trees.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` when the row width differs from the
    /// training width, or `EmptyForest` when there are no trees.
    pub fn predict_proba(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::EmptyForest);
        }
        Ok(self.mean_proba(row))
    }

    /// Class prediction for one row. A probability strictly above one
    /// half is positive; an exact tie is negative.
    ///
    /// # Errors
    /// Same conditions as [`Self::predict_proba`].
    pub fn predict(&self, row: &[f64]) -> Result<bool> {
        Ok(self.predict_proba(row)? > 0.5)
    }

    /// Class predictions for every row of a matrix.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` when the column count differs from
    /// the training width, or `EmptyForest` when there are no trees.
    pub fn predict_batch(&self, features: &ArrayView2<'_, f64>) -> Result<Vec<bool>> {
        if features.ncols() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                actual: features.ncols(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::EmptyForest);
        }
        let mut predictions = Vec::with_capacity(features.nrows());
        for row in features.outer_iter() {
            let proba = match row.as_slice() {
                Some(values) => self.mean_proba(values),
                None => self.mean_proba(&row.to_vec()),
            };
            predictions.push(proba > 0.5);
        }
        Ok(predictions)
    }

    fn mean_proba(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.predict_proba(row)).sum();
        sum / self.trees.len() as f64
    }

    /// The fitted trees.
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Number of trees in the ensemble.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Feature width the forest was trained on.
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Mean decrease in impurity per feature, normalized to sum to one
    /// (all zero when no tree ever split).
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// The configuration the forest was trained with.
    pub const fn config(&self) -> &RandomForestConfig {
        &self.config
    }
}
