//! Training run reports.
//!
//! Summarizes a completed training run as plain text for the terminal,
//! CSV for spreadsheets, or JSON for downstream tooling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during report rendering.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Report output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text table for terminal display.
    Text,

    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ReportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// One feature's share of the forest's impurity decrease.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureImportance {
    /// Feature label, e.g. `workclass= Private` or `age`.
    pub feature: String,

    /// Normalized importance in `[0, 1]`.
    pub importance: f64,
}

impl fmt::Display for FeatureImportance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}%", self.feature, self.importance * 100.0)
    }
}

/// Pair feature labels with importances and keep the `top` largest.
///
/// Ties keep their input order.
pub fn rank_features(labels: &[String], importances: &[f64], top: usize) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = labels
        .iter()
        .zip(importances)
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.clone(),
            importance: *importance,
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked.truncate(top);
    ranked
}

/// Summary of a completed training run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingReport {
    /// When the report was generated.
    pub created_at: DateTime<Utc>,

    /// Number of rows the model was trained on.
    pub trained_rows: usize,

    /// Number of rows carrying the positive label.
    pub positive_rows: usize,

    /// Width of the transformed feature matrix.
    pub feature_width: usize,

    /// Number of trees in the forest.
    pub n_trees: usize,

    /// Accuracy of the fitted model on its own training rows.
    pub train_accuracy: f64,

    /// Highest-ranked features by importance.
    pub top_features: Vec<FeatureImportance>,
}

impl TrainingReport {
    /// Create a report stamped with the current time.
    pub fn new(
        trained_rows: usize,
        positive_rows: usize,
        feature_width: usize,
        n_trees: usize,
        train_accuracy: f64,
        top_features: Vec<FeatureImportance>,
    ) -> Self {
        Self {
            created_at: Utc::now(),
            trained_rows,
            positive_rows,
            feature_width,
            n_trees,
            train_accuracy,
            top_features,
        }
    }

    /// Share of training rows carrying the positive label.
    pub fn positive_ratio(&self) -> f64 {
        if self.trained_rows == 0 {
            return 0.0;
        }
        self.positive_rows as f64 / self.trained_rows as f64
    }

    /// Format as a plain text table for terminal display.
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("\nTraining Report\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!("  Rows trained:        {}\n", self.trained_rows));
        output.push_str(&format!(
            "  Positive rows:       {} ({:.1}% of total)\n",
            self.positive_rows,
            self.positive_ratio() * 100.0
        ));
        output.push_str(&format!("  Feature width:       {}\n", self.feature_width));
        output.push_str(&format!("  Trees:               {}\n", self.n_trees));
        output.push_str(&format!(
            "  Training accuracy:   {:.2}%\n",
            self.train_accuracy * 100.0
        ));

        if !self.top_features.is_empty() {
            output.push_str("\nTop Features:\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            output.push_str(&format!("{:<50} {:>12}\n", "Feature", "Importance"));
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for feature in &self.top_features {
                output.push_str(&format!(
                    "{:<50} {:>11.2}%\n",
                    feature.feature,
                    feature.importance * 100.0
                ));
            }
        }

        output.push_str(&"=".repeat(80));
        output.push('\n');

        output
    }

    /// Render the report in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Csv => {
                let mut output = String::new();
                output.push_str(&format!("# Rows: {}\n", self.trained_rows));
                output.push_str(&format!("# Positive rows: {}\n", self.positive_rows));
                output.push_str(&format!("# Feature width: {}\n", self.feature_width));
                output.push_str(&format!("# Trees: {}\n", self.n_trees));
                output.push_str(&format!("# Training accuracy: {}\n", self.train_accuracy));

                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.write_record(["feature", "importance"])?;
                for feature in &self.top_features {
                    wtr.write_record([&feature.feature, &feature.importance.to_string()])?;
                }
                let table =
                    String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?).unwrap();
                output.push_str(&table);
                Ok(output)
            }
            ReportFormat::Json => Ok(serde_json::to_string(self)?),
            ReportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Render the report to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn write_to_file(&self, path: &Path, format: ReportFormat) -> Result<(), ReportError> {
        let content = self.render(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trained on {} rows ({} positive)",
            self.trained_rows, self.positive_rows
        )?;
        writeln!(f, "  Feature width: {}", self.feature_width)?;
        writeln!(f, "  Trees: {}", self.n_trees)?;
        writeln!(
            f,
            "  Training accuracy: {:.2}%",
            self.train_accuracy * 100.0
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_report() -> TrainingReport {
        TrainingReport::new(
            4,
            2,
            7,
            5,
            0.985,
            vec![
                FeatureImportance {
                    feature: "age".to_string(),
                    importance: 0.6,
                },
                FeatureImportance {
                    feature: "workclass= Private".to_string(),
                    importance: 0.4,
                },
            ],
        )
    }

    #[rstest]
    #[case(ReportFormat::Text, "txt")]
    #[case(ReportFormat::Csv, "csv")]
    #[case(ReportFormat::Json, "json")]
    #[case(ReportFormat::PrettyJson, "json")]
    fn test_report_format_extension(#[case] format: ReportFormat, #[case] expected: &str) {
        assert_eq!(format.extension(), expected);
    }

    #[test]
    fn test_rank_features_orders_descending() {
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let importances = vec![0.2, 0.5, 0.3];

        let ranked = rank_features(&labels, &importances, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].feature, "b");
        assert_eq!(ranked[1].feature, "c");
    }

    #[test]
    fn test_rank_features_tie_keeps_input_order() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let importances = vec![0.5, 0.5];

        let ranked = rank_features(&labels, &importances, 2);
        assert_eq!(ranked[0].feature, "a");
        assert_eq!(ranked[1].feature, "b");
    }

    #[test]
    fn test_text_report_contains_metrics() {
        let text = sample_report().to_text();
        assert!(text.contains("Training Report"));
        assert!(text.contains("Rows trained:        4"));
        assert!(text.contains("(50.0% of total)"));
        assert!(text.contains("98.50%"));
        assert!(text.contains("workclass= Private"));
    }

    #[test]
    fn test_csv_report() {
        let csv = sample_report().render(ReportFormat::Csv).unwrap();
        assert!(csv.starts_with("# Rows: 4\n"));
        assert!(csv.contains("feature,importance"));
        assert!(csv.contains("age,0.6"));
        assert!(csv.contains("workclass= Private,0.4"));
    }

    #[test]
    fn test_json_report() {
        let json = sample_report().render(ReportFormat::Json).unwrap();
        assert!(json.contains("\"train_accuracy\":0.985"));
        assert!(json.contains("\"top_features\""));
        assert!(json.contains("\"age\""));
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let json = sample_report().render(ReportFormat::PrettyJson).unwrap();
        assert!(json.contains("  "));
    }

    #[test]
    fn test_write_to_file() {
        use std::io::Read;

        let path = std::env::temp_dir().join("hobart_report_test.csv");
        sample_report()
            .write_to_file(&path, ReportFormat::Csv)
            .unwrap();

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        std::fs::remove_file(&path).ok();
        assert!(content.contains("feature,importance"));
    }

    #[test]
    fn test_positive_ratio_guards_empty() {
        let report = TrainingReport::new(0, 0, 0, 0, 0.0, vec![]);
        assert_eq!(report.positive_ratio(), 0.0);
    }

    #[test]
    fn test_display() {
        let display = format!("{}", sample_report());
        assert!(display.contains("Trained on 4 rows (2 positive)"));
        assert!(display.contains("98.50%"));
    }
}
