//! Score-based column selection.
//!
//! A [`SelectionMask`] assigns one score per input column and keeps the k
//! highest-scoring columns. Ties resolve to the lower column index, and the
//! kept columns always come out in ascending index order, so a mask fully
//! determines both which columns survive and how they are arranged.

use crate::error::{FeatureError, Result};
use crate::value::FeatureValue;
use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Serialize};

/// Per-column scores plus the number of columns to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionMask {
    scores: Vec<f64>,
    k: usize,
}

impl SelectionMask {
    /// Create a mask over `scores.len()` columns keeping the top `k`.
    ///
    /// # Errors
    /// Returns `FeatureError::InvalidSelection` when `k` is zero, `k`
    /// exceeds the number of columns, or any score is not finite.
    pub fn new(scores: Vec<f64>, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(FeatureError::InvalidSelection(
                "k must be at least 1".to_string(),
            ));
        }
        if k > scores.len() {
            return Err(FeatureError::InvalidSelection(format!(
                "k = {} exceeds the {} scored columns",
                k,
                scores.len()
            )));
        }
        if let Some(score) = scores.iter().find(|s| !s.is_finite()) {
            return Err(FeatureError::InvalidSelection(format!(
                "scores must be finite, got {score}"
            )));
        }
        Ok(Self { scores, k })
    }

    /// A mask over `width` columns keeping exactly the column at `index`.
    pub fn single(index: usize, width: usize) -> Result<Self> {
        if index >= width {
            return Err(FeatureError::InvalidSelection(format!(
                "column index {index} out of range for width {width}"
            )));
        }
        let mut scores = vec![0.0; width];
        scores[index] = 1.0;
        Self::new(scores, 1)
    }

    /// Number of input columns the mask scores.
    pub fn width(&self) -> usize {
        self.scores.len()
    }

    /// Number of columns the mask keeps.
    pub const fn selected_count(&self) -> usize {
        self.k
    }

    /// Indices of the kept columns, in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        order.sort_by(|&a, &b| self.scores[b].total_cmp(&self.scores[a]).then(a.cmp(&b)));
        let mut kept: Vec<usize> = order.into_iter().take(self.k).collect();
        kept.sort_unstable();
        kept
    }
}

/// Applies a [`SelectionMask`] to frames and raw rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSelector {
    mask: SelectionMask,
}

impl ColumnSelector {
    /// Create a selector from a mask.
    pub const fn new(mask: SelectionMask) -> Self {
        Self { mask }
    }

    /// The underlying mask.
    pub const fn mask(&self) -> &SelectionMask {
        &self.mask
    }

    /// Pick the masked columns out of a frame, by position.
    ///
    /// # Errors
    /// Returns `FeatureError::DimensionMismatch` when the frame width does
    /// not match the mask width.
    pub fn select_columns<'a>(&self, frame: &'a DataFrame) -> Result<Vec<&'a Column>> {
        if frame.width() != self.mask.width() {
            return Err(FeatureError::DimensionMismatch {
                expected: self.mask.width(),
                actual: frame.width(),
            });
        }
        let columns = frame.get_columns();
        Ok(self
            .mask
            .selected_indices()
            .into_iter()
            .map(|index| &columns[index])
            .collect())
    }

    /// Pick the masked cells out of a raw row, by position.
    pub fn select_row<'a>(&self, row: &'a [FeatureValue]) -> Result<Vec<&'a FeatureValue>> {
        if row.len() != self.mask.width() {
            return Err(FeatureError::DimensionMismatch {
                expected: self.mask.width(),
                actual: row.len(),
            });
        }
        Ok(self
            .mask
            .selected_indices()
            .into_iter()
            .map(|index| &row[index])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};
    use rstest::rstest;

    #[test]
    fn test_top_k_with_tie_to_lower_index() {
        // Columns 0 and 3 tie on the highest score; k = 3 keeps the lower
        // index of the tie plus the next best.
        let mask = SelectionMask::new(vec![1.0, 0.2, 0.8, 1.0, 0.5], 3).unwrap();
        assert_eq!(mask.selected_indices(), vec![0, 2, 3]);
    }

    #[test]
    fn test_selected_indices_ascending() {
        let mask = SelectionMask::new(vec![0.1, 0.9, 0.2, 0.8], 2).unwrap();
        assert_eq!(mask.selected_indices(), vec![1, 3]);
    }

    #[test]
    fn test_single() {
        let mask = SelectionMask::single(5, 14).unwrap();
        assert_eq!(mask.width(), 14);
        assert_eq!(mask.selected_indices(), vec![5]);
    }

    #[rstest]
    #[case(vec![1.0, 2.0], 0)]
    #[case(vec![1.0, 2.0], 3)]
    #[case(vec![1.0, f64::NAN], 1)]
    fn test_invalid_masks(#[case] scores: Vec<f64>, #[case] k: usize) {
        assert!(matches!(
            SelectionMask::new(scores, k),
            Err(FeatureError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_select_columns_by_position() {
        let frame = DataFrame::new(vec![
            Series::new("a".into(), vec![1i64, 2]).into(),
            Series::new("b".into(), vec![3i64, 4]).into(),
            Series::new("c".into(), vec![5i64, 6]).into(),
        ])
        .unwrap();

        let selector = ColumnSelector::new(SelectionMask::new(vec![0.0, 1.0, 1.0], 2).unwrap());
        let columns = selector.select_columns(&frame).unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name().as_str(), "b");
        assert_eq!(columns[1].name().as_str(), "c");
    }

    #[test]
    fn test_select_rejects_wrong_width() {
        let selector = ColumnSelector::new(SelectionMask::single(0, 3).unwrap());
        let row = vec![FeatureValue::from(1.0), FeatureValue::from(2.0)];
        assert!(matches!(
            selector.select_row(&row),
            Err(FeatureError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
