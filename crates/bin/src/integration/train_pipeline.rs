//! End-to-end census income training pipeline.
//!
//! Downloads the training file from object storage, parses and splits
//! it, fits the feature union and random forest, evaluates on the
//! training rows, and uploads the saved artifact to the model
//! directory the environment provides.

use super::feature_builder;
use hobart::schema::POSITIVE_LABEL;
use hobart::CensusColumn;
use hobart_data::frame::{label_vector, read_delimited_frame};
use hobart_data::{DataError, ObjectLocation, StorageClient};
use hobart_features::{FeatureError, FeatureUnion};
use hobart_model::{ModelError, RandomForest, RandomForestConfig};
use hobart_output::{
    ARTIFACT_FILE_NAME, ArtifactError, ArtifactMetadata, CompositeModel, TrainingReport,
    rank_features, save_artifact,
};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::PolarsError;
use std::path::Path;

/// Local staging name for the downloaded training file.
const INPUT_FILE_NAME: &str = "input.data";

/// Environment variable naming the destination directory for the model.
const ENV_MODEL_DIR: &str = "AIP_MODEL_DIR";

/// Number of features listed in the training report.
const TOP_FEATURE_COUNT: usize = 10;

/// Error type for the training pipeline.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TrainError {
    /// The model directory environment variable is missing.
    #[error("AIP_MODEL_DIR environment variable is not set")]
    MissingModelDir,
    /// Storage or parsing error from the data layer.
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    /// Feature pipeline error.
    #[error("Feature pipeline error: {0}")]
    Feature(#[from] FeatureError),
    /// Model training error.
    #[error("Model training error: {0}")]
    Model(#[from] ModelError),
    /// Artifact assembly or persistence error.
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
    /// DataFrame error.
    #[error("Data frame error: {0}")]
    Polars(#[from] PolarsError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Train a census income model from a stored data file and upload the
/// resulting artifact.
pub(crate) async fn train_and_upload(bucket: &str, object: &str) -> Result<(), TrainError> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", "CENSUS INCOME TRAINER");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Data: gs://{}/{}", bucket, object);

    // Resolve the destination before any network or training work
    let destination = model_destination()?;
    println!("Model destination: {}", destination);

    let config = RandomForestConfig::default();
    println!(
        "Model: random forest ({} trees, {} categorical + {} numeric features)\n",
        config.n_trees,
        CensusColumn::categorical_columns().len(),
        CensusColumn::numeric_columns().len()
    );

    let client = StorageClient::new()?;

    print!("Downloading training data...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let input_path = Path::new(INPUT_FILE_NAME);
    let downloaded = client.download_to_file(bucket, object, input_path).await?;
    println!(" ✓ ({} bytes)", downloaded);

    print!("Reading {}...", INPUT_FILE_NAME);
    std::io::Write::flush(&mut std::io::stdout())?;
    let frame = read_delimited_frame(input_path, &feature_builder::census_column_specs())?;
    println!(" ✓ ({} rows)", frame.height());

    print!("Splitting features and labels...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let labels = label_vector(&frame, CensusColumn::IncomeLevel.name(), POSITIVE_LABEL)?;
    let features = frame.drop(CensusColumn::IncomeLevel.name())?;
    let positive_rows = labels.iter().filter(|&&label| label).count();
    println!(" ✓ ({} positive rows)", positive_rows);

    print!("Fitting feature union...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let specs = feature_builder::build_stage_specs()?;
    let (union, matrix) = FeatureUnion::fit_transform(specs, &features)?;
    println!(" ✓ ({} feature columns)", union.output_width());

    let pb = ProgressBar::new(config.n_trees as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );
    pb.set_message("Training random forest...");
    let forest = RandomForest::fit_with_progress(&matrix.view(), &labels, config, || pb.inc(1))?;
    pb.finish_with_message("Forest trained");

    print!("Evaluating on training rows...");
    std::io::Write::flush(&mut std::io::stdout())?;
    let model = CompositeModel::new(union, forest)?;
    let predictions = model.predict_frame(&features)?;
    let correct = predictions
        .iter()
        .zip(&labels)
        .filter(|(predicted, actual)| predicted == actual)
        .count();
    let accuracy = correct as f64 / labels.len() as f64;
    println!(" ✓ ({:.2}% accuracy)", accuracy * 100.0);

    print!("Saving {}...", ARTIFACT_FILE_NAME);
    std::io::Write::flush(&mut std::io::stdout())?;
    let metadata = ArtifactMetadata::new(
        frame.height(),
        model.union().output_width(),
        CensusColumn::feature_columns()
            .iter()
            .map(|column| column.name().to_string())
            .collect(),
        POSITIVE_LABEL.to_string(),
    );
    let artifact_path = Path::new(ARTIFACT_FILE_NAME);
    save_artifact(artifact_path, &model, &metadata)?;
    println!(" ✓");

    let upload_target = destination.join(ARTIFACT_FILE_NAME);
    print!("Uploading to {}...", upload_target);
    std::io::Write::flush(&mut std::io::stdout())?;
    let uploaded = client.upload_from_file(artifact_path, &upload_target).await?;
    println!(" ✓ ({} bytes)", uploaded);

    let report = TrainingReport::new(
        frame.height(),
        positive_rows,
        model.union().output_width(),
        model.forest().n_trees(),
        accuracy,
        rank_features(
            &model.union().feature_labels(),
            model.forest().feature_importances(),
            TOP_FEATURE_COUNT,
        ),
    );
    println!("{}", report.to_text());

    Ok(())
}

/// Read and parse the model directory from the environment.
fn model_destination() -> Result<ObjectLocation, TrainError> {
    let raw = std::env::var(ENV_MODEL_DIR).map_err(|_| TrainError::MissingModelDir)?;
    Ok(ObjectLocation::parse(&raw)?)
}
