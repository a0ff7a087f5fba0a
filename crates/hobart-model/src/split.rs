//! Split finding for a single tree node.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Gains below this are treated as no improvement.
const MIN_GAIN: f64 = 1e-12;

/// Split quality criterion for binary labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitCriterion {
    /// Gini impurity
    Gini,

    /// Shannon entropy
    Entropy,
}

impl SplitCriterion {
    /// Impurity of a node holding `positives` positive out of `total`
    /// samples.
    pub fn impurity(&self, positives: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let p = positives as f64 / total as f64;
        match self {
            // Binary Gini: 1 - p^2 - (1-p)^2
            Self::Gini => 2.0 * p * (1.0 - p),
            Self::Entropy => {
                let q = 1.0 - p;
                let mut entropy = 0.0;
                if p > 0.0 {
                    entropy -= p * p.log2();
                }
                if q > 0.0 {
                    entropy -= q * q.log2();
                }
                entropy
            }
        }
    }
}

/// A chosen split: rows with `value <= threshold` go left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split {
    pub feature: usize,
    pub threshold: f64,
    pub gain: f64,
}

/// Find the best split over the candidate features at one node.
///
/// `rows` indexes into the sample set, `candidates` must be sorted
/// ascending so equal gains resolve to the lower feature index. Thresholds
/// are midpoints between consecutive distinct values. Returns `None` when
/// the node is pure or no boundary yields children of at least
/// `min_samples_leaf` samples with a positive gain.
pub(crate) fn best_split(
    features: &ArrayView2<'_, f64>,
    labels: &[bool],
    rows: &[usize],
    candidates: &[usize],
    criterion: SplitCriterion,
    min_samples_leaf: usize,
) -> Option<Split> {
    let total = rows.len();
    let positives = rows.iter().filter(|&&row| labels[row]).count();
    let parent_impurity = criterion.impurity(positives, total);
    if parent_impurity == 0.0 {
        return None;
    }

    let mut best: Option<Split> = None;
    let mut ordered = rows.to_vec();

    for &feature in candidates {
        ordered.sort_by(|&a, &b| features[[a, feature]].total_cmp(&features[[b, feature]]));

        let mut left_positives = 0usize;
        for boundary in 1..total {
            if labels[ordered[boundary - 1]] {
                left_positives += 1;
            }

            let previous = features[[ordered[boundary - 1], feature]];
            let value = features[[ordered[boundary], feature]];
            if value <= previous {
                continue;
            }

            let left = boundary;
            let right = total - boundary;
            if left < min_samples_leaf || right < min_samples_leaf {
                continue;
            }

            let right_positives = positives - left_positives;
            let weighted = (left as f64 * criterion.impurity(left_positives, left)
                + right as f64 * criterion.impurity(right_positives, right))
                / total as f64;
            let gain = parent_impurity - weighted;

            if gain > MIN_GAIN && best.as_ref().is_none_or(|current| gain > current.gain) {
                best = Some(Split {
                    feature,
                    threshold: (previous + value) / 2.0,
                    gain,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_gini_extremes() {
        assert_relative_eq!(SplitCriterion::Gini.impurity(0, 10), 0.0);
        assert_relative_eq!(SplitCriterion::Gini.impurity(10, 10), 0.0);
        assert_relative_eq!(SplitCriterion::Gini.impurity(5, 10), 0.5);
    }

    #[test]
    fn test_entropy_extremes() {
        assert_relative_eq!(SplitCriterion::Entropy.impurity(0, 8), 0.0);
        assert_relative_eq!(SplitCriterion::Entropy.impurity(8, 8), 0.0);
        assert_relative_eq!(SplitCriterion::Entropy.impurity(4, 8), 1.0);
    }

    #[test]
    fn test_finds_separating_boundary() {
        // Feature 0 separates perfectly at the midpoint of 2.0 and 10.0;
        // feature 1 is constant and can never split.
        let features = array![[1.0, 5.0], [2.0, 5.0], [10.0, 5.0], [11.0, 5.0]];
        let labels = [false, false, true, true];
        let rows = [0, 1, 2, 3];

        let split = best_split(
            &features.view(),
            &labels,
            &rows,
            &[0, 1],
            SplitCriterion::Gini,
            1,
        )
        .unwrap();

        assert_eq!(split.feature, 0);
        assert_relative_eq!(split.threshold, 6.0);
        // Parent impurity 0.5, both children pure
        assert_relative_eq!(split.gain, 0.5);
    }

    #[test]
    fn test_pure_node_has_no_split() {
        let features = array![[1.0], [2.0], [3.0]];
        let labels = [true, true, true];
        let rows = [0, 1, 2];

        let split = best_split(
            &features.view(),
            &labels,
            &rows,
            &[0],
            SplitCriterion::Gini,
            1,
        );
        assert!(split.is_none());
    }

    #[test]
    fn test_min_samples_leaf_blocks_boundaries() {
        // The gainful boundaries strand one sample on a side; the one
        // permitted boundary has zero gain.
        let features = array![[1.0], [5.0], [6.0], [7.0]];
        let labels = [true, false, true, false];
        let rows = [0, 1, 2, 3];

        let split = best_split(
            &features.view(),
            &labels,
            &rows,
            &[0],
            SplitCriterion::Gini,
            2,
        );
        assert!(split.is_none());
    }

    #[test]
    fn test_constant_feature_has_no_split() {
        let features = array![[3.0], [3.0], [3.0], [3.0]];
        let labels = [true, false, true, false];
        let rows = [0, 1, 2, 3];

        let split = best_split(
            &features.view(),
            &labels,
            &rows,
            &[0],
            SplitCriterion::Gini,
            1,
        );
        assert!(split.is_none());
    }
}
