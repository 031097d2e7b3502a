//! Text and section similarity scores in `[0, 1]`.

use similar::TextDiff;

use crate::models::section::Section;

/// Character-level similarity ratio of two strings.
///
/// `2 * matched / (len(a) + len(b))`; identical strings score 1.0,
/// including two empty strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    f64::from(TextDiff::from_chars(a, b).ratio())
}

/// Weighted blend of header and content similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScorer {
    header_weight: f64,
    content_weight: f64,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            header_weight: 0.3,
            content_weight: 0.7,
        }
    }
}

impl SimilarityScorer {
    /// Weights are normalized by their sum, so the score stays in `[0, 1]`.
    /// Callers validate that at least one weight is positive.
    pub fn new(header_weight: f64, content_weight: f64) -> Self {
        Self {
            header_weight,
            content_weight,
        }
    }

    /// Score two sections by header text and normalized content.
    pub fn score(&self, a: &Section, b: &Section) -> f64 {
        let total = self.header_weight + self.content_weight;
        if total <= 0.0 {
            return 0.0;
        }
        let header = similarity(&a.header, &b.header);
        let content = similarity(&a.similarity_hash, &b.similarity_hash);
        (self.header_weight * header + self.content_weight * content) / total
    }
}
