//! Feature union: ordered named stages concatenated into one matrix.
//!
//! A union is described by [`StageSpec`]s, fit once against the training
//! frame, and then applied either frame-wise (training) or row-wise
//! (scoring a single raw record). Both paths produce identical layouts:
//! each stage's outputs occupy a contiguous block, in stage order.

use crate::encode::CategoryEncoder;
use crate::error::{FeatureError, Result};
use crate::select::{ColumnSelector, SelectionMask};
use crate::value::FeatureValue;
use ndarray::Array2;
use polars::prelude::{Column, DataFrame, DataType};
use serde::{Deserialize, Serialize};

/// Unfitted description of one union stage.
#[derive(Debug, Clone)]
pub enum StageSpec {
    /// One-hot encode the single text column picked by the mask.
    Categorical {
        /// Stage name
        name: String,
        /// Mask selecting exactly one column
        mask: SelectionMask,
    },

    /// Pass the numeric columns picked by the mask through unchanged.
    Numeric {
        /// Stage name
        name: String,
        /// Mask selecting the numeric columns
        mask: SelectionMask,
    },
}

impl StageSpec {
    fn mask(&self) -> &SelectionMask {
        match self {
            Self::Categorical { mask, .. } | Self::Numeric { mask, .. } => mask,
        }
    }
}

/// One fitted stage of the union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureStage {
    /// One-hot encoding of a single text column
    Categorical {
        /// Stage name
        name: String,
        /// Name of the column the encoder was fit on
        source_column: String,
        /// Selector for the source column
        selector: ColumnSelector,
        /// Fitted encoder
        encoder: CategoryEncoder,
    },

    /// Numeric columns passed through unchanged
    Numeric {
        /// Stage name
        name: String,
        /// Names of the selected columns, in output order
        source_columns: Vec<String>,
        /// Selector for the numeric columns
        selector: ColumnSelector,
    },
}

impl FeatureStage {
    /// Stage name.
    pub fn name(&self) -> &str {
        match self {
            Self::Categorical { name, .. } | Self::Numeric { name, .. } => name,
        }
    }

    /// Number of output features the stage contributes.
    pub fn output_width(&self) -> usize {
        match self {
            Self::Categorical { encoder, .. } => encoder.width(),
            Self::Numeric { selector, .. } => selector.mask().selected_count(),
        }
    }

    fn input_width(&self) -> usize {
        match self {
            Self::Categorical { selector, .. } | Self::Numeric { selector, .. } => {
                selector.mask().width()
            }
        }
    }
}

/// Ordered named stages over a shared attribute matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureUnion {
    stages: Vec<FeatureStage>,
}

impl FeatureUnion {
    /// Fit every stage against the training frame.
    ///
    /// # Arguments
    /// * `specs` - Stage descriptions, in output order
    /// * `frame` - Training attribute frame, one column per masked position
    ///
    /// # Errors
    /// Returns `FeatureError::InvalidSelection` when no stages are given,
    /// the stage masks disagree on input width, or a categorical stage
    /// selects more than one column; `FeatureError::TypeMismatch` when a
    /// numeric stage selects a non-numeric column.
    pub fn fit(specs: Vec<StageSpec>, frame: &DataFrame) -> Result<Self> {
        let Some(first) = specs.first() else {
            return Err(FeatureError::InvalidSelection(
                "a union needs at least one stage".to_string(),
            ));
        };

        let input_width = first.mask().width();
        for spec in &specs {
            if spec.mask().width() != input_width {
                return Err(FeatureError::InvalidSelection(format!(
                    "stage masks disagree on input width: {} vs {}",
                    spec.mask().width(),
                    input_width
                )));
            }
        }

        let mut stages = Vec::with_capacity(specs.len());
        for spec in specs {
            match spec {
                StageSpec::Categorical { name, mask } => {
                    if mask.selected_count() != 1 {
                        return Err(FeatureError::InvalidSelection(format!(
                            "categorical stage {name} must select exactly one column"
                        )));
                    }
                    let selector = ColumnSelector::new(mask);
                    let columns = selector.select_columns(frame)?;
                    let column = columns[0];
                    let encoder = CategoryEncoder::fit_column(column)?;
                    stages.push(FeatureStage::Categorical {
                        name,
                        source_column: column.name().to_string(),
                        selector,
                        encoder,
                    });
                }
                StageSpec::Numeric { name, mask } => {
                    let selector = ColumnSelector::new(mask);
                    let columns = selector.select_columns(frame)?;
                    let mut source_columns = Vec::with_capacity(columns.len());
                    for column in columns {
                        if !matches!(column.dtype(), DataType::Int64 | DataType::Float64) {
                            return Err(FeatureError::TypeMismatch {
                                column: column.name().to_string(),
                                expected: format!("numeric column, got {}", column.dtype()),
                            });
                        }
                        source_columns.push(column.name().to_string());
                    }
                    stages.push(FeatureStage::Numeric {
                        name,
                        source_columns,
                        selector,
                    });
                }
            }
        }

        Ok(Self { stages })
    }

    /// Fit against a frame and transform it in one call.
    pub fn fit_transform(specs: Vec<StageSpec>, frame: &DataFrame) -> Result<(Self, Array2<f64>)> {
        let union = Self::fit(specs, frame)?;
        let matrix = union.transform(frame)?;
        Ok((union, matrix))
    }

    /// Stages in output order.
    pub fn stages(&self) -> &[FeatureStage] {
        &self.stages
    }

    /// Width of the attribute matrix the union was fit on.
    pub fn input_width(&self) -> usize {
        self.stages.first().map_or(0, FeatureStage::input_width)
    }

    /// Total number of output features across all stages.
    pub fn output_width(&self) -> usize {
        self.stages.iter().map(FeatureStage::output_width).sum()
    }

    /// Human-readable labels for every output feature, in order.
    ///
    /// Categorical outputs are labelled `column=category`; numeric outputs
    /// carry their column name.
    pub fn feature_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.output_width());
        for stage in &self.stages {
            match stage {
                FeatureStage::Categorical {
                    source_column,
                    encoder,
                    ..
                } => {
                    for category in encoder.categories() {
                        labels.push(format!("{source_column}={category}"));
                    }
                }
                FeatureStage::Numeric { source_columns, .. } => {
                    labels.extend(source_columns.iter().cloned());
                }
            }
        }
        labels
    }

    /// Transform a frame into the combined feature matrix.
    ///
    /// # Returns
    /// A `frame.height()` by [`output_width`](Self::output_width) matrix.
    pub fn transform(&self, frame: &DataFrame) -> Result<Array2<f64>> {
        let rows = frame.height();
        let mut matrix = Array2::zeros((rows, self.output_width()));
        let mut offset = 0;

        for stage in &self.stages {
            match stage {
                FeatureStage::Categorical {
                    name,
                    selector,
                    encoder,
                    ..
                } => {
                    let columns = selector.select_columns(frame)?;
                    let column = columns.first().ok_or_else(|| {
                        FeatureError::InvalidSelection(format!("stage {name} selects no columns"))
                    })?;
                    let cells = column.str()?;
                    for (row, cell) in cells.into_iter().enumerate() {
                        // Unseen and missing values both leave the block at zero
                        if let Some(value) = cell
                            && let Some(position) = encoder.position(value)
                        {
                            matrix[[row, offset + position]] = 1.0;
                        }
                    }
                    offset += encoder.width();
                }
                FeatureStage::Numeric { selector, .. } => {
                    for column in selector.select_columns(frame)? {
                        write_numeric_column(&mut matrix, offset, column)?;
                        offset += 1;
                    }
                }
            }
        }

        Ok(matrix)
    }

    /// Transform one raw attribute row into the combined feature vector.
    ///
    /// The row must hold one value per attribute column, in the same order
    /// as the frame the union was fit on.
    pub fn transform_row(&self, row: &[FeatureValue]) -> Result<Vec<f64>> {
        let mut features = Vec::with_capacity(self.output_width());

        for stage in &self.stages {
            match stage {
                FeatureStage::Categorical {
                    source_column,
                    selector,
                    encoder,
                    ..
                } => {
                    let cells = selector.select_row(row)?;
                    let cell = cells.first().ok_or_else(|| {
                        FeatureError::InvalidSelection(format!(
                            "stage over {source_column} selects no columns"
                        ))
                    })?;
                    let value = cell.as_text().ok_or_else(|| FeatureError::TypeMismatch {
                        column: source_column.clone(),
                        expected: "text".to_string(),
                    })?;
                    features.extend(encoder.encode(value));
                }
                FeatureStage::Numeric {
                    source_columns,
                    selector,
                    ..
                } => {
                    for (cell, column) in selector.select_row(row)?.iter().zip(source_columns) {
                        let value = cell.as_number().ok_or_else(|| FeatureError::TypeMismatch {
                            column: column.clone(),
                            expected: "number".to_string(),
                        })?;
                        features.push(value);
                    }
                }
            }
        }

        Ok(features)
    }
}

fn write_numeric_column(matrix: &mut Array2<f64>, offset: usize, column: &Column) -> Result<()> {
    match column.dtype() {
        DataType::Int64 => {
            for (row, cell) in column.i64()?.into_iter().enumerate() {
                let value = cell.ok_or_else(|| FeatureError::MissingValue {
                    column: column.name().to_string(),
                    row,
                })?;
                matrix[[row, offset]] = value as f64;
            }
        }
        DataType::Float64 => {
            for (row, cell) in column.f64()?.into_iter().enumerate() {
                let value = cell.ok_or_else(|| FeatureError::MissingValue {
                    column: column.name().to_string(),
                    row,
                })?;
                matrix[[row, offset]] = value;
            }
        }
        other => {
            return Err(FeatureError::TypeMismatch {
                column: column.name().to_string(),
                expected: format!("numeric column, got {other}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("age".into(), vec![39i64, 50, 38, 53]).into(),
            Series::new(
                "workclass".into(),
                vec![" State-gov", " Self-emp-not-inc", " Private", " Private"],
            )
            .into(),
            Series::new("sex".into(), vec![" Male", " Female", " Male", " Male"]).into(),
            Series::new("hours-per-week".into(), vec![40i64, 13, 40, 45]).into(),
        ])
        .unwrap()
    }

    fn sample_specs() -> Vec<StageSpec> {
        vec![
            StageSpec::Categorical {
                name: "categorical-1".to_string(),
                mask: SelectionMask::single(1, 4).unwrap(),
            },
            StageSpec::Categorical {
                name: "categorical-2".to_string(),
                mask: SelectionMask::single(2, 4).unwrap(),
            },
            StageSpec::Numeric {
                name: "numerical".to_string(),
                mask: SelectionMask::new(vec![1.0, 0.0, 0.0, 1.0], 2).unwrap(),
            },
        ]
    }

    fn sample_row() -> Vec<FeatureValue> {
        vec![
            FeatureValue::from(39i64),
            FeatureValue::from(" State-gov"),
            FeatureValue::from(" Male"),
            FeatureValue::from(40i64),
        ]
    }

    #[test]
    fn test_output_width_sums_distinct_categories_and_numerics() {
        let union = FeatureUnion::fit(sample_specs(), &sample_frame()).unwrap();
        // workclass has 3 distinct values, sex has 2, plus 2 numeric columns
        assert_eq!(union.output_width(), 3 + 2 + 2);
        assert_eq!(union.input_width(), 4);
    }

    #[test]
    fn test_transform_layout() {
        let frame = sample_frame();
        let (union, matrix) = FeatureUnion::fit_transform(sample_specs(), &frame).unwrap();
        assert_eq!(matrix.dim(), (4, 7));

        // Row 0: workclass " State-gov" is the last of the three sorted
        // categories, sex " Male" the second of two, then age and hours.
        let row: Vec<f64> = matrix.row(0).to_vec();
        assert_eq!(row, vec![0.0, 0.0, 1.0, 0.0, 1.0, 39.0, 40.0]);

        let labels = union.feature_labels();
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], "workclass= Private");
        assert_eq!(labels[5], "age");
        assert_eq!(labels[6], "hours-per-week");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let frame = sample_frame();
        let union = FeatureUnion::fit(sample_specs(), &frame).unwrap();
        let first = union.transform(&frame).unwrap();
        let second = union.transform(&frame).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_frame_and_row_paths_agree() {
        let frame = sample_frame();
        let union = FeatureUnion::fit(sample_specs(), &frame).unwrap();
        let matrix = union.transform(&frame).unwrap();
        let features = union.transform_row(&sample_row()).unwrap();
        assert_eq!(features, matrix.row(0).to_vec());
    }

    #[test]
    fn test_unseen_category_encodes_to_zero_block() {
        let union = FeatureUnion::fit(sample_specs(), &sample_frame()).unwrap();
        let mut row = sample_row();
        row[1] = FeatureValue::from(" Never-worked");
        let features = union.transform_row(&row).unwrap();
        assert_eq!(&features[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&features[3..], &[0.0, 1.0, 39.0, 40.0]);
    }

    #[test]
    fn test_categorical_stage_requires_single_column() {
        let specs = vec![StageSpec::Categorical {
            name: "categorical-1".to_string(),
            mask: SelectionMask::new(vec![1.0, 1.0, 0.0, 0.0], 2).unwrap(),
        }];
        assert!(matches!(
            FeatureUnion::fit(specs, &sample_frame()),
            Err(FeatureError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_numeric_stage_rejects_text_column() {
        let specs = vec![StageSpec::Numeric {
            name: "numerical".to_string(),
            mask: SelectionMask::single(1, 4).unwrap(),
        }];
        assert!(matches!(
            FeatureUnion::fit(specs, &sample_frame()),
            Err(FeatureError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_row_width_must_match() {
        let union = FeatureUnion::fit(sample_specs(), &sample_frame()).unwrap();
        let short = vec![FeatureValue::from(1.0)];
        assert!(matches!(
            union.transform_row(&short),
            Err(FeatureError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let union = FeatureUnion::fit(sample_specs(), &sample_frame()).unwrap();
        let json = serde_json::to_string(&union).unwrap();
        let restored: FeatureUnion = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, union);
        assert_eq!(
            restored.transform_row(&sample_row()).unwrap(),
            union.transform_row(&sample_row()).unwrap()
        );
    }
}
