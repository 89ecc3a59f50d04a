//! Inference provider adapters

pub mod replicate;

pub use replicate::{ReplicatePredictionProvider, ReplicateSettings};
