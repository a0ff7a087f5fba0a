#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobartml/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod forest;
pub mod split;
pub mod tree;

pub use config::{MaxFeatures, RandomForestConfig};
pub use error::{ModelError, Result};
pub use forest::RandomForest;
pub use split::SplitCriterion;
pub use tree::DecisionTree;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
