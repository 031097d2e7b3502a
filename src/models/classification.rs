//! Change classification types.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The nature of a code change.
///
/// Declaration order matters: when two categories score equally, the one
/// declared first wins.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ChangeType {
    Feature,
    Bugfix,
    Refactor,
    Performance,
    Style,
    Test,
    Docs,
    Chore,
    Unknown,
}

/// Outcome of classifying one diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationResult {
    pub change_type: ChangeType,
    /// At most five file paths, in first-seen order, never `/dev/null`.
    pub affected_components: Vec<String>,
    /// Heuristic certainty in `[0.0, 1.0]`.
    pub confidence: f64,
    pub summary: String,
}

impl ClassificationResult {
    /// The fixed result for empty or whitespace-only input.
    pub fn empty() -> Self {
        Self {
            change_type: ChangeType::Unknown,
            affected_components: Vec::new(),
            confidence: 0.0,
            summary: "Empty or invalid git diff provided".to_string(),
        }
    }
}
