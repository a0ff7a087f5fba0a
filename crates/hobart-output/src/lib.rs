#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobartml/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod artifact;
pub mod report;

pub use artifact::{
    ARTIFACT_FILE_NAME, ArtifactError, ArtifactMetadata, ArtifactPayload, ArtifactV1,
    CompositeModel, load_artifact, save_artifact,
};
pub use report::{FeatureImportance, ReportError, ReportFormat, TrainingReport, rank_features};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
