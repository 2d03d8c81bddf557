//! Metrics and numerical utilities shared by the model implementations

pub mod metrics;
pub mod optimization;
