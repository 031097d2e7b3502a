//! Markdown consolidation: split a document into sections, cluster
//! near-duplicates, merge each cluster, and rebuild the document.

pub mod grouping;
pub mod merge;
pub mod sections;
pub mod similarity;

pub use grouping::group_sections;
pub use merge::merge_group;
pub use sections::{has_open_fence, parse_sections, similarity_key};
pub use similarity::{SimilarityScorer, similarity};

use thiserror::Error;

use crate::config::ConsolidationConfig;
use crate::models::section::{DeduplicationAnalysis, Section};

/// Errors from consolidation.
#[derive(Debug, Error)]
pub enum ConsolidateError {
    #[error("similarity threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("similarity weights must be non-negative and not both zero, got header={header} content={content}")]
    InvalidWeights { header: f64, content: f64 },
}

/// Runs the consolidation pipeline with a fixed threshold and scorer.
#[derive(Debug, Clone)]
pub struct Consolidator {
    threshold: f64,
    scorer: SimilarityScorer,
}

impl Consolidator {
    pub fn new(config: &ConsolidationConfig) -> Result<Self, ConsolidateError> {
        let threshold = check_threshold(config.threshold)?;
        let (header, content) = (config.header_weight, config.content_weight);
        if header < 0.0 || content < 0.0 || header + content <= 0.0 {
            return Err(ConsolidateError::InvalidWeights { header, content });
        }
        Ok(Self {
            threshold,
            scorer: SimilarityScorer::new(header, content),
        })
    }

    /// Default weights with the given threshold.
    pub fn with_threshold(threshold: f64) -> Result<Self, ConsolidateError> {
        Ok(Self {
            threshold: check_threshold(threshold)?,
            scorer: SimilarityScorer::default(),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Consolidate a markdown document.
    ///
    /// Documents with at most one section come back untouched. Otherwise
    /// the output is rebuilt from the merged sections, which normalizes
    /// spacing even when nothing was collapsed.
    pub fn deduplicate(&self, content: &str) -> DeduplicationAnalysis {
        let sections = parse_sections(content);
        let original_sections = sections.len();

        if original_sections <= 1 {
            return DeduplicationAnalysis {
                original_sections,
                deduplicated_sections: original_sections,
                deduplicated: false,
                removed_duplicates: Vec::new(),
                merged_sections: Vec::new(),
                cleaned_sections: sections,
                cleaned_content: content.to_string(),
                space_saved: 0,
            };
        }

        let groups = group_sections(&sections, self.threshold, &self.scorer);

        let mut removed_duplicates = Vec::new();
        let mut merged_sections = Vec::new();
        let mut cleaned_sections = Vec::with_capacity(groups.len());

        for group in &groups {
            if group.len() > 1 {
                removed_duplicates.extend(group.duplicates().iter().map(|s| s.header.clone()));
                let headers: Vec<&str> = group.members().map(|s| s.header.as_str()).collect();
                merged_sections.push(format!("Merged: {}", headers.join(", ")));
            }
            cleaned_sections.push(merge_group(group));
        }

        let cleaned_content = reconstruct(&cleaned_sections);
        let deduplicated_sections = cleaned_sections.len();
        let space_saved = char_len(content) - char_len(&cleaned_content);

        tracing::debug!(
            original = original_sections,
            remaining = deduplicated_sections,
            space_saved,
            "consolidated document"
        );

        DeduplicationAnalysis {
            original_sections,
            deduplicated_sections,
            deduplicated: deduplicated_sections < original_sections,
            removed_duplicates,
            merged_sections,
            cleaned_sections,
            cleaned_content,
            space_saved,
        }
    }
}

/// Consolidate `content` with default weights.
pub fn deduplicate(content: &str, threshold: f64) -> Result<DeduplicationAnalysis, ConsolidateError> {
    Ok(Consolidator::with_threshold(threshold)?.deduplicate(content))
}

/// Render sections back to markdown.
///
/// Each section is its header line, a blank line, its content, and a
/// blank line. Preambles have no header line. A code fence left open by
/// a section's content is closed so it cannot swallow later headers.
/// Trailing whitespace is trimmed from the result.
pub fn reconstruct(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        if !section.is_preamble() {
            out.push_str(&"#".repeat(section.level));
            out.push(' ');
            out.push_str(&section.header);
            out.push_str("\n\n");
        }
        out.push_str(&section.content);
        if has_open_fence(&section.content) {
            out.push_str("\n```");
        }
        out.push_str("\n\n");
    }
    out.truncate(out.trim_end().len());
    out
}

fn check_threshold(threshold: f64) -> Result<f64, ConsolidateError> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(threshold)
    } else {
        Err(ConsolidateError::InvalidThreshold(threshold))
    }
}

fn char_len(text: &str) -> i64 {
    i64::try_from(text.chars().count()).unwrap_or(i64::MAX)
}
