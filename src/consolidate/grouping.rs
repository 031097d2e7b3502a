//! Greedy clustering of similar sections.

use rayon::prelude::*;

use super::similarity::SimilarityScorer;
use crate::models::section::{Section, SectionGroup};

/// Partition sections into groups of near-duplicates.
///
/// Walks sections in order. Each section not yet claimed opens a group
/// and pulls in every later unclaimed section scoring at least
/// `threshold` against it. Membership is judged against the anchor only,
/// so two members of one group may score below the threshold against
/// each other.
///
/// Every input section lands in exactly one group; groups are ordered by
/// anchor position and members keep document order.
pub fn group_sections(
    sections: &[Section],
    threshold: f64,
    scorer: &SimilarityScorer,
) -> Vec<SectionGroup> {
    let mut used = vec![false; sections.len()];
    let mut groups = Vec::new();

    for (i, anchor) in sections.iter().enumerate() {
        if used[i] {
            continue;
        }
        used[i] = true;

        let candidates: Vec<usize> = (i + 1..sections.len()).filter(|&j| !used[j]).collect();
        let matches: Vec<usize> = candidates
            .par_iter()
            .copied()
            .filter(|&j| scorer.score(anchor, &sections[j]) >= threshold)
            .collect();

        let mut group = SectionGroup::new(anchor.clone());
        for j in matches {
            used[j] = true;
            group.push(sections[j].clone());
        }

        if group.len() > 1 {
            tracing::debug!(
                anchor = %anchor.header,
                members = group.len(),
                "grouped similar sections"
            );
        }
        groups.push(group);
    }

    groups
}
