//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.changelens.toml` in the working directory
//! 4. `~/.config/changelens/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub consolidation: ConsolidationConfig,
}

/// Scoring weights for the diff classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Added to a category for every affected file matching one of its indicators.
    pub file_indicator_weight: u32,
    /// Added to a category for every distinct content pattern found in the diff.
    pub content_pattern_weight: u32,
    /// Added to `feature` when the diff creates a file.
    pub new_file_bonus: u32,
    /// Added to `chore` when the diff deletes a file.
    pub deleted_file_bonus: u32,
    /// Added to `refactor` when the diff renames a file.
    pub rename_bonus: u32,
    pub max_affected_components: usize,
    pub confidence: ConfidenceConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            file_indicator_weight: 3,
            content_pattern_weight: 1,
            new_file_bonus: 2,
            deleted_file_bonus: 2,
            rename_bonus: 1,
            max_affected_components: 5,
            confidence: ConfidenceConfig::default(),
        }
    }
}

/// Confidence adjustments applied after a change type is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub base: f64,
    /// Bonus for `test` and `docs`, whose file indicators are unambiguous.
    pub focused_category_bonus: f64,
    /// Bonus for `feature` with a new file, or `bugfix` mentioning fix/bug.
    pub evidence_bonus: f64,
    pub length_penalty: f64,
    /// Diffs with more lines than this are penalised.
    pub long_diff_lines: usize,
    /// Diffs with fewer lines than this are penalised.
    pub short_diff_lines: usize,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 0.5,
            focused_category_bonus: 0.3,
            evidence_bonus: 0.2,
            length_penalty: 0.1,
            long_diff_lines: 100,
            short_diff_lines: 10,
        }
    }
}

/// Tuning for section deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Minimum weighted similarity for a section to join a group, in `(0, 1]`.
    pub threshold: f64,
    pub header_weight: f64,
    pub content_weight: f64,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            header_weight: 0.3,
            content_weight: 0.7,
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, working-directory config, then applies
    /// environment variable overrides.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        if let Some(root) = work_dir {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        config.apply_env_vars(env);
        config.validate()?;

        Ok(config)
    }

    /// Load a config from a specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Check value ranges that would otherwise surface as confusing results.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.consolidation;
        if !(c.threshold > 0.0 && c.threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "consolidation.threshold must be in (0, 1], got {}",
                c.threshold
            )));
        }
        if c.header_weight < 0.0
            || c.content_weight < 0.0
            || c.header_weight + c.content_weight <= 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "consolidation weights must be non-negative and not both zero, got header={} content={}",
                c.header_weight, c.content_weight
            )));
        }
        let conf = &self.classifier.confidence;
        if !(0.0..=1.0).contains(&conf.base) {
            return Err(ConfigError::Invalid(format!(
                "classifier.confidence.base must be in [0, 1], got {}",
                conf.base
            )));
        }
        Ok(())
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_classifier = ClassifierConfig::default();
        let ours = &mut self.classifier;
        let theirs = other.classifier;
        if theirs.file_indicator_weight != default_classifier.file_indicator_weight {
            ours.file_indicator_weight = theirs.file_indicator_weight;
        }
        if theirs.content_pattern_weight != default_classifier.content_pattern_weight {
            ours.content_pattern_weight = theirs.content_pattern_weight;
        }
        if theirs.new_file_bonus != default_classifier.new_file_bonus {
            ours.new_file_bonus = theirs.new_file_bonus;
        }
        if theirs.deleted_file_bonus != default_classifier.deleted_file_bonus {
            ours.deleted_file_bonus = theirs.deleted_file_bonus;
        }
        if theirs.rename_bonus != default_classifier.rename_bonus {
            ours.rename_bonus = theirs.rename_bonus;
        }
        if theirs.max_affected_components != default_classifier.max_affected_components {
            ours.max_affected_components = theirs.max_affected_components;
        }

        let default_confidence = ConfidenceConfig::default();
        if theirs.confidence.base != default_confidence.base {
            ours.confidence.base = theirs.confidence.base;
        }
        if theirs.confidence.focused_category_bonus != default_confidence.focused_category_bonus {
            ours.confidence.focused_category_bonus = theirs.confidence.focused_category_bonus;
        }
        if theirs.confidence.evidence_bonus != default_confidence.evidence_bonus {
            ours.confidence.evidence_bonus = theirs.confidence.evidence_bonus;
        }
        if theirs.confidence.length_penalty != default_confidence.length_penalty {
            ours.confidence.length_penalty = theirs.confidence.length_penalty;
        }
        if theirs.confidence.long_diff_lines != default_confidence.long_diff_lines {
            ours.confidence.long_diff_lines = theirs.confidence.long_diff_lines;
        }
        if theirs.confidence.short_diff_lines != default_confidence.short_diff_lines {
            ours.confidence.short_diff_lines = theirs.confidence.short_diff_lines;
        }

        let default_consolidation = ConsolidationConfig::default();
        if other.consolidation.threshold != default_consolidation.threshold {
            self.consolidation.threshold = other.consolidation.threshold;
        }
        if other.consolidation.header_weight != default_consolidation.header_weight {
            self.consolidation.header_weight = other.consolidation.header_weight;
        }
        if other.consolidation.content_weight != default_consolidation.content_weight {
            self.consolidation.content_weight = other.consolidation.content_weight;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = parse_env_f64(env, constants::ENV_THRESHOLD) {
            self.consolidation.threshold = val;
        }
        if let Some(val) = parse_env_f64(env, constants::ENV_HEADER_WEIGHT) {
            // Keep the two weights summing to one.
            if (0.0..=1.0).contains(&val) {
                self.consolidation.header_weight = val;
                self.consolidation.content_weight = 1.0 - val;
            } else {
                tracing::warn!(
                    "ignoring out-of-range {} value: {val}",
                    constants::ENV_HEADER_WEIGHT
                );
            }
        }
    }
}

/// Read a float env var, warning about and ignoring unparsable values.
fn parse_env_f64(env: &Env, name: &str) -> Option<f64> {
    let raw = env.var(name).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(val) => Some(val),
        Err(_) => {
            tracing::warn!("ignoring invalid {name} value: {raw}");
            None
        }
    }
}
