#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobartml/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod encode;
pub mod error;
pub mod select;
pub mod union;
pub mod value;

pub use encode::CategoryEncoder;
pub use error::{FeatureError, Result};
pub use select::{ColumnSelector, SelectionMask};
pub use union::{FeatureStage, FeatureUnion, StageSpec};
pub use value::FeatureValue;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
