//! Integration module for the census income training pipeline.
//!
//! Wires the schema, storage, feature, model, and artifact crates into
//! the end-to-end train-and-upload flow the binary runs.

pub(crate) mod feature_builder;
pub(crate) mod train_pipeline;
