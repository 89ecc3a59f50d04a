//! Replicate predictions API adapter

mod client;
mod types;

pub use client::{ReplicatePredictionProvider, ReplicateSettings};
