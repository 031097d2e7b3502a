//! Shared types used across all modules.
//!
//! This module defines the core data structures for parsed diffs,
//! classification results, structured analysis, and markdown sections.
//! Other modules import from here rather than reaching into each other's
//! internals.

pub mod analysis;
pub mod classification;
pub mod diff;
pub mod section;

use std::path::PathBuf;

pub use analysis::{
    ClassChange, DiffAnalysisResult, FileStats, FunctionChange, ImportChange, Language,
    SymbolChangeKind,
};
pub use classification::{ChangeType, ClassificationResult};
pub use diff::{DiffHunk, DiffLine, DiffLineKind, FileChange};
pub use section::{DeduplicationAnalysis, Section, SectionGroup};

use schemars::JsonSchema;
use serde::Serialize;

/// Where the CLI reads its input text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read the whole file at this path.
    File(PathBuf),
    /// Read standard input to EOF.
    Stdin,
}

/// Classification and structured extraction of the same diff.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ChangeReport {
    pub classification: ClassificationResult,
    pub analysis: DiffAnalysisResult,
}
