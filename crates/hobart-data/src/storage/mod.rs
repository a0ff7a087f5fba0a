//! Object storage access.
//!
//! This module provides the pieces of Google Cloud Storage the trainer
//! needs: parsing `gs://` locations, downloading one object to a local
//! file, and uploading one local file to an object.

pub mod client;
pub mod location;

pub use client::StorageClient;
pub use location::ObjectLocation;
