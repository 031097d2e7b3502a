//! Markdown section types used by content consolidation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A markdown header plus its body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Section {
    /// Header text without the leading `#` markers. Empty for a preamble.
    pub header: String,
    /// Trimmed body text.
    pub content: String,
    /// Header depth, 1 to 6.
    pub level: usize,
    /// First line of the section (1-based, the header line when present).
    pub line_start: usize,
    /// Last line of the section (1-based, inclusive).
    pub line_end: usize,
    /// Normalized content used for similarity comparison.
    pub similarity_hash: String,
}

impl Section {
    /// Returns `true` for the header-less text before the first heading.
    pub fn is_preamble(&self) -> bool {
        self.header.is_empty()
    }
}

/// Sections judged to be duplicates of the group's first member.
///
/// Never empty: the anchor is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionGroup {
    anchor: Section,
    duplicates: Vec<Section>,
}

impl SectionGroup {
    /// Start a group with its anchor section.
    pub fn new(anchor: Section) -> Self {
        Self {
            anchor,
            duplicates: Vec::new(),
        }
    }

    pub fn push(&mut self, section: Section) {
        self.duplicates.push(section);
    }

    /// The section that opened this group.
    pub fn anchor(&self) -> &Section {
        &self.anchor
    }

    /// Members added after the anchor, in document order.
    pub fn duplicates(&self) -> &[Section] {
        &self.duplicates
    }

    /// All members, anchor first.
    pub fn members(&self) -> impl Iterator<Item = &Section> {
        std::iter::once(&self.anchor).chain(self.duplicates.iter())
    }

    pub fn len(&self) -> usize {
        1 + self.duplicates.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Result of one consolidation pass over a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DeduplicationAnalysis {
    pub original_sections: usize,
    pub deduplicated_sections: usize,
    /// Whether any sections were collapsed.
    pub deduplicated: bool,
    /// Headers of every non-anchor group member.
    pub removed_duplicates: Vec<String>,
    /// One `"Merged: a, b"` entry per group with more than one member.
    pub merged_sections: Vec<String>,
    pub cleaned_sections: Vec<Section>,
    pub cleaned_content: String,
    /// Character count of the input minus that of `cleaned_content`; negative when formatting grew the text.
    pub space_saved: i64,
}
