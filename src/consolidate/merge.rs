//! Collapse a group of similar sections into one.

use indexmap::IndexMap;

use super::sections::build_section;
use crate::models::section::{Section, SectionGroup};

/// Merge every member of a group into a single section.
///
/// - header: most frequent header text, earliest on ties
/// - content and level: from the member with the longest content,
///   earliest on ties
/// - line range: spans all members
///
/// A single-member group yields its section unchanged.
pub fn merge_group(group: &SectionGroup) -> Section {
    if group.len() == 1 {
        return group.anchor().clone();
    }

    let header = most_common_header(group);
    let richest = longest_content(group);
    let line_start = group.members().map(|s| s.line_start).min().unwrap_or(0);
    let line_end = group.members().map(|s| s.line_end).max().unwrap_or(0);

    build_section(
        header,
        richest.content.clone(),
        richest.level,
        line_start,
        line_end,
    )
}

fn most_common_header(group: &SectionGroup) -> String {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for member in group.members() {
        *counts.entry(member.header.as_str()).or_default() += 1;
    }

    let mut best = group.anchor().header.as_str();
    let mut best_count = 0;
    for (header, count) in counts {
        if count > best_count {
            best = header;
            best_count = count;
        }
    }
    best.to_string()
}

fn longest_content(group: &SectionGroup) -> &Section {
    let mut best = group.anchor();
    let mut best_len = best.content.chars().count();
    for member in group.duplicates() {
        let len = member.content.chars().count();
        if len > best_len {
            best = member;
            best_len = len;
        }
    }
    best
}
