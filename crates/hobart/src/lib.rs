#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobartml/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod schema;

// Re-export main types from sub-crates
pub use hobart_data as data;
pub use hobart_features as features;
pub use hobart_model as model;
pub use hobart_output as output;

// Re-export common schema types
pub use schema::{ColumnKind, census::CensusColumn};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
