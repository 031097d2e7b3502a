//! Configuration loading and layering.
//!
//! Handles `.changelens.toml` loading, environment variable resolution,
//! and CLI flag merging with proper priority ordering.

pub mod loader;

pub use loader::{ClassifierConfig, Config, ConfidenceConfig, ConfigError, ConsolidationConfig};
