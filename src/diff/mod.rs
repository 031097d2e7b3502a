//! Diff engine: unified diff parsing, affected-file extraction,
//! change classification, and structured symbol extraction.
//!
//! Everything here is a pure function over diff text. Malformed input
//! never fails; it produces empty or `unknown` results instead.

pub mod classifier;
pub mod extractor;
pub mod files;
pub mod languages;
pub mod parser;

pub use classifier::{DiffClassifier, classify};
pub use extractor::{extract, extract_with_hint};
pub use files::affected_files;
pub use parser::parse_unified_diff;

use crate::models::ChangeReport;

/// Classify a diff and extract its structured changes, using the
/// classified change type as the extraction hint.
pub fn analyze(diff: &str, classifier: &DiffClassifier) -> ChangeReport {
    let classification = classifier.classify(diff);
    let analysis = extract_with_hint(diff, Some(classification.change_type));
    ChangeReport {
        classification,
        analysis,
    }
}
