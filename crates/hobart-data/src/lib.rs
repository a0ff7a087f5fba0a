#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobartml/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frame;
pub mod storage;

pub use error::{DataError, Result};
pub use storage::{ObjectLocation, StorageClient};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
