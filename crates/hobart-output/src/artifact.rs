//! Composite model artifacts.
//!
//! A composite model bundles the fitted feature union with the random
//! forest trained on its output, so a raw row can be classified without
//! refitting either part. Artifacts persist as a version-tagged JSON
//! envelope; new format versions add payload variants rather than
//! modifying existing ones.

use chrono::{DateTime, Utc};
use hobart_features::{FeatureError, FeatureUnion, FeatureValue};
use hobart_model::{ModelError, RandomForest};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// File name the trained artifact is saved under, fixed by the serving
/// platform contract.
pub const ARTIFACT_FILE_NAME: &str = "model.joblib";

/// Errors that can occur while assembling or persisting an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Feature transform error.
    #[error("Feature transform error: {0}")]
    Feature(#[from] FeatureError),

    /// Model prediction error.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Union output width does not match the forest input width.
    #[error("Feature union emits {union} columns but the forest expects {forest}")]
    WidthMismatch {
        /// Columns the feature union produces.
        union: usize,
        /// Columns the forest was trained on.
        forest: usize,
    },
}

/// A fitted feature union paired with the forest trained on its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeModel {
    union: FeatureUnion,
    forest: RandomForest,
}

impl CompositeModel {
    /// Pair a fitted union with a fitted forest.
    ///
    /// # Errors
    ///
    /// Returns `WidthMismatch` when the union's output width differs
    /// from the feature count the forest was trained on.
    pub fn new(union: FeatureUnion, forest: RandomForest) -> Result<Self, ArtifactError> {
        if union.output_width() != forest.n_features() {
            return Err(ArtifactError::WidthMismatch {
                union: union.output_width(),
                forest: forest.n_features(),
            });
        }
        Ok(Self { union, forest })
    }

    /// Classify every row of a raw feature frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame does not match the fitted columns.
    pub fn predict_frame(&self, frame: &DataFrame) -> Result<Vec<bool>, ArtifactError> {
        let matrix = self.union.transform(frame)?;
        Ok(self.forest.predict_batch(&matrix.view())?)
    }

    /// Classify a single raw row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row does not match the fitted columns.
    pub fn predict_row(&self, row: &[FeatureValue]) -> Result<bool, ArtifactError> {
        let values = self.union.transform_row(row)?;
        Ok(self.forest.predict(&values)?)
    }

    /// Positive-class probability for a single raw row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row does not match the fitted columns.
    pub fn predict_proba_row(&self, row: &[FeatureValue]) -> Result<f64, ArtifactError> {
        let values = self.union.transform_row(row)?;
        Ok(self.forest.predict_proba(&values)?)
    }

    /// The fitted feature union.
    pub const fn union(&self) -> &FeatureUnion {
        &self.union
    }

    /// The fitted forest.
    pub const fn forest(&self) -> &RandomForest {
        &self.forest
    }
}

/// Provenance recorded alongside a saved model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// When the artifact was written.
    pub created_at: DateTime<Utc>,

    /// Version of the trainer that produced the artifact.
    pub trainer_version: String,

    /// Number of rows the model was trained on.
    pub trained_rows: usize,

    /// Width of the transformed feature matrix.
    pub feature_width: usize,

    /// Raw input column names, in frame order.
    pub column_names: Vec<String>,

    /// Raw label text treated as the positive class.
    pub positive_label: String,
}

impl ArtifactMetadata {
    /// Create metadata stamped with the current time and crate version.
    pub fn new(
        trained_rows: usize,
        feature_width: usize,
        column_names: Vec<String>,
        positive_label: String,
    ) -> Self {
        Self {
            created_at: Utc::now(),
            trainer_version: env!("CARGO_PKG_VERSION").to_string(),
            trained_rows,
            feature_width,
            column_names,
            positive_label,
        }
    }
}

/// Version-tagged artifact envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ArtifactPayload {
    /// Version 1 artifact format.
    V1(ArtifactV1),
}

/// Version 1 artifact contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactV1 {
    /// Provenance metadata.
    pub metadata: ArtifactMetadata,

    /// The composite model.
    pub model: CompositeModel,
}

/// Write a composite model and its metadata to `path` as JSON.
///
/// # Errors
///
/// Returns an error if serialization or file writing fails.
pub fn save_artifact(
    path: &Path,
    model: &CompositeModel,
    metadata: &ArtifactMetadata,
) -> Result<(), ArtifactError> {
    let payload = ArtifactPayload::V1(ArtifactV1 {
        metadata: metadata.clone(),
        model: model.clone(),
    });
    let contents = serde_json::to_string(&payload)?;
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Read a saved artifact back from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not contain a
/// valid artifact envelope.
pub fn load_artifact(path: &Path) -> Result<(CompositeModel, ArtifactMetadata), ArtifactError> {
    let contents = std::fs::read_to_string(path)?;
    let ArtifactPayload::V1(artifact) = serde_json::from_str(&contents)?;
    Ok((artifact.model, artifact.metadata))
}
