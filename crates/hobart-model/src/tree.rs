//! Structure-of-arrays decision trees and their CART builder.
//!
//! Nodes live in flat parallel arrays indexed by node id, with the root at
//! zero. Split nodes route rows with `value <= threshold` to the left
//! child; a NaN feature fails that comparison and goes right. Leaves hold
//! the fraction of positive training samples that reached them.

use crate::config::RandomForestConfig;
use crate::split::best_split;
use ndarray::ArrayView2;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// One CART tree stored as parallel arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    split_features: Vec<u32>,
    split_thresholds: Vec<f64>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f64>,
}

impl DecisionTree {
    /// Grow one tree over the given sample rows.
    ///
    /// `rows` may repeat indices (bootstrap sampling). Impurity decreases
    /// are accumulated into `importances`, weighted by the node sample
    /// count.
    pub(crate) fn fit(
        features: &ArrayView2<'_, f64>,
        labels: &[bool],
        rows: Vec<usize>,
        config: &RandomForestConfig,
        rng: &mut StdRng,
        importances: &mut [f64],
    ) -> Self {
        let mut tree = Self {
            split_features: Vec::new(),
            split_thresholds: Vec::new(),
            left_children: Vec::new(),
            right_children: Vec::new(),
            is_leaf: Vec::new(),
            leaf_values: Vec::new(),
        };
        let root = tree.allocate_node();
        tree.grow(root, features, labels, rows, 0, config, rng, importances);
        tree
    }

    #[allow(clippy::too_many_arguments)]
    fn grow(
        &mut self,
        node: usize,
        features: &ArrayView2<'_, f64>,
        labels: &[bool],
        rows: Vec<usize>,
        depth: usize,
        config: &RandomForestConfig,
        rng: &mut StdRng,
        importances: &mut [f64],
    ) {
        let total = rows.len();
        let positives = rows.iter().filter(|&&row| labels[row]).count();

        let depth_reached = config.max_depth.is_some_and(|limit| depth >= limit);
        if depth_reached
            || total < config.min_samples_split
            || positives == 0
            || positives == total
        {
            self.make_leaf(node, positives, total);
            return;
        }

        let n_features = features.ncols();
        let candidates =
            sample_candidates(config.max_features.resolve(n_features), n_features, rng);
        let Some(split) = best_split(
            features,
            labels,
            &rows,
            &candidates,
            config.criterion,
            config.min_samples_leaf,
        ) else {
            self.make_leaf(node, positives, total);
            return;
        };

        importances[split.feature] += total as f64 * split.gain;

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&row| features[[row, split.feature]] <= split.threshold);

        let left = self.allocate_node();
        let right = self.allocate_node();
        self.split_features[node] = split.feature as u32;
        self.split_thresholds[node] = split.threshold;
        self.left_children[node] = left as u32;
        self.right_children[node] = right as u32;
        self.is_leaf[node] = false;

        self.grow(
            left,
            features,
            labels,
            left_rows,
            depth + 1,
            config,
            rng,
            importances,
        );
        self.grow(
            right,
            features,
            labels,
            right_rows,
            depth + 1,
            config,
            rng,
            importances,
        );
    }

    fn allocate_node(&mut self) -> usize {
        self.split_features.push(0);
        self.split_thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(true);
        self.leaf_values.push(0.0);
        self.split_features.len() - 1
    }

    fn make_leaf(&mut self, node: usize, positives: usize, total: usize) {
        self.is_leaf[node] = true;
        self.leaf_values[node] = if total == 0 {
            0.0
        } else {
            positives as f64 / total as f64
        };
    }

    /// Positive-class fraction at the leaf this row reaches.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        while !self.is_leaf[node] {
            let feature = self.split_features[node] as usize;
            let value = row.get(feature).copied().unwrap_or(f64::NAN);
            // NaN fails the comparison and routes right
            node = if value <= self.split_thresholds[node] {
                self.left_children[node] as usize
            } else {
                self.right_children[node] as usize
            };
        }
        self.leaf_values[node]
    }

    /// Number of nodes in the tree.
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&leaf| leaf).count()
    }
}

/// Draw `count` distinct feature indices, returned sorted ascending.
fn sample_candidates(count: usize, n_features: usize, rng: &mut StdRng) -> Vec<usize> {
    if count >= n_features {
        return (0..n_features).collect();
    }
    let mut indices: Vec<usize> = (0..n_features).collect();
    for i in 0..count {
        let j = rng.gen_range(i..n_features);
        indices.swap(i, j);
    }
    indices.truncate(count);
    indices.sort_unstable();
    indices
}
