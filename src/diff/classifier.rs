//! Heuristic change-type classification.
//!
//! A diff is scored against a fixed table of categories. Each category has
//! file-path indicators (matched per affected file) and content patterns
//! (matched once each against the whole diff, case-insensitively). A few
//! structural git markers add fixed bonuses. The highest strictly-greater
//! score wins; ties go to the category declared first.

use crate::config::ClassifierConfig;
use crate::models::classification::{ChangeType, ClassificationResult};

use super::files::affected_files;

/// Indicators and patterns for one change category.
#[derive(Debug)]
pub struct CategoryRule {
    pub change_type: ChangeType,
    /// Lowercase substrings tested against each lowercased file path.
    pub file_indicators: &'static [&'static str],
    /// Lowercase substrings tested against the lowercased diff text.
    pub content_patterns: &'static [&'static str],
}

/// Category table in tie-break order.
pub static CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        change_type: ChangeType::Feature,
        file_indicators: &[],
        content_patterns: &["new ", "add ", "create ", "implement", "+def ", "+class ", "+function"],
    },
    CategoryRule {
        change_type: ChangeType::Bugfix,
        file_indicators: &[],
        content_patterns: &["fix", "bug", "error", "issue", "patch", "correct"],
    },
    CategoryRule {
        change_type: ChangeType::Refactor,
        file_indicators: &[],
        content_patterns: &["refactor", "cleanup", "reorganize", "restructure", "simplify"],
    },
    CategoryRule {
        change_type: ChangeType::Performance,
        file_indicators: &[],
        content_patterns: &["optimize", "performance", "speed", "cache", "efficient"],
    },
    CategoryRule {
        change_type: ChangeType::Style,
        file_indicators: &[".css", ".scss", ".less", "prettier", "eslint", "style"],
        content_patterns: &["format", "indent", "whitespace", "style", "lint"],
    },
    CategoryRule {
        change_type: ChangeType::Test,
        file_indicators: &[".test.", "test_", "_test.", "/tests/", "spec_", "_spec."],
        content_patterns: &[],
    },
    CategoryRule {
        change_type: ChangeType::Docs,
        file_indicators: &[".md", ".rst", ".txt", "readme", "changelog", "license", "/docs/"],
        content_patterns: &[],
    },
    CategoryRule {
        change_type: ChangeType::Chore,
        file_indicators: &[
            "package.json",
            "requirements.txt",
            "dockerfile",
            ".yml",
            ".yaml",
            "makefile",
        ],
        content_patterns: &[],
    },
];

const NEW_FILE_MARKER: &str = "new file mode";
const DELETED_FILE_MARKER: &str = "deleted file mode";
const RENAME_MARKER: &str = "rename from";

/// Total score for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScore {
    pub change_type: ChangeType,
    pub score: u32,
}

/// Scores diffs against [`CATEGORY_RULES`] using configurable weights.
#[derive(Debug, Clone, Default)]
pub struct DiffClassifier {
    config: ClassifierConfig,
}

impl DiffClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a diff. Empty or whitespace-only input yields the fixed
    /// `unknown` result with zero confidence.
    pub fn classify(&self, diff: &str) -> ClassificationResult {
        if diff.trim().is_empty() {
            return ClassificationResult::empty();
        }

        let files = affected_files(diff);
        let lowered = diff.to_lowercase();
        let scores = self.scores(diff, &lowered, &files);
        let change_type = pick_change_type(&scores);
        let confidence = self.confidence(change_type, diff, &lowered);

        tracing::debug!(
            %change_type,
            confidence,
            files = files.len(),
            ?scores,
            "classified diff"
        );

        let summary = summarize(change_type, &files);
        let mut affected_components = files;
        affected_components.truncate(self.config.max_affected_components);

        ClassificationResult {
            change_type,
            affected_components,
            confidence,
            summary,
        }
    }

    /// Classify optional input; `None` is treated like empty text.
    pub fn classify_opt(&self, diff: Option<&str>) -> ClassificationResult {
        match diff {
            Some(text) => self.classify(text),
            None => ClassificationResult::empty(),
        }
    }

    /// Score every category. `lowered` must be `diff.to_lowercase()`.
    pub fn scores(&self, diff: &str, lowered: &str, files: &[String]) -> Vec<CategoryScore> {
        let lowered_files: Vec<String> = files.iter().map(|f| f.to_lowercase()).collect();

        let mut scores: Vec<CategoryScore> = CATEGORY_RULES
            .iter()
            .map(|rule| {
                let matching_files = lowered_files
                    .iter()
                    .filter(|path| rule.file_indicators.iter().any(|ind| path.contains(ind)))
                    .count() as u32;
                let matching_patterns = rule
                    .content_patterns
                    .iter()
                    .filter(|pat| lowered.contains(*pat))
                    .count() as u32;

                CategoryScore {
                    change_type: rule.change_type,
                    score: matching_files * self.config.file_indicator_weight
                        + matching_patterns * self.config.content_pattern_weight,
                }
            })
            .collect();

        if diff.contains(NEW_FILE_MARKER) {
            add_bonus(&mut scores, ChangeType::Feature, self.config.new_file_bonus);
        }
        if diff.contains(DELETED_FILE_MARKER) {
            add_bonus(&mut scores, ChangeType::Chore, self.config.deleted_file_bonus);
        }
        if diff.contains(RENAME_MARKER) {
            add_bonus(&mut scores, ChangeType::Refactor, self.config.rename_bonus);
        }

        scores
    }

    fn confidence(&self, change_type: ChangeType, diff: &str, lowered: &str) -> f64 {
        let cfg = &self.config.confidence;
        let mut confidence = cfg.base;

        match change_type {
            ChangeType::Test | ChangeType::Docs => confidence += cfg.focused_category_bonus,
            ChangeType::Feature if diff.contains(NEW_FILE_MARKER) => {
                confidence += cfg.evidence_bonus;
            }
            ChangeType::Bugfix if lowered.contains("fix") || lowered.contains("bug") => {
                confidence += cfg.evidence_bonus;
            }
            _ => {}
        }

        let line_count = diff.split('\n').count();
        if line_count > cfg.long_diff_lines {
            confidence -= cfg.length_penalty;
        }
        if line_count < cfg.short_diff_lines {
            confidence -= cfg.length_penalty;
        }

        confidence.clamp(0.0, 1.0)
    }
}

/// Classify with the default weights.
pub fn classify(diff: &str) -> ClassificationResult {
    DiffClassifier::default().classify(diff)
}

fn add_bonus(scores: &mut [CategoryScore], change_type: ChangeType, bonus: u32) {
    if let Some(entry) = scores.iter_mut().find(|s| s.change_type == change_type) {
        entry.score += bonus;
    }
}

/// Highest score wins; earlier categories win ties; all-zero is `unknown`.
fn pick_change_type(scores: &[CategoryScore]) -> ChangeType {
    let mut best: Option<CategoryScore> = None;
    for score in scores {
        if best.is_none_or(|b| score.score > b.score) {
            best = Some(*score);
        }
    }
    match best {
        Some(b) if b.score > 0 => b.change_type,
        _ => ChangeType::Unknown,
    }
}

fn summarize(change_type: ChangeType, files: &[String]) -> String {
    match files {
        [] => format!("Detected {change_type} changes with no clear file modifications"),
        [only] => format!("Detected {change_type} changes in {only}"),
        _ => {
            let shown = files.iter().take(3).map(String::as_str).collect::<Vec<_>>().join(", ");
            let ellipsis = if files.len() > 3 { "..." } else { "" };
            format!(
                "Detected {change_type} changes across {} files: {shown}{ellipsis}",
                files.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(scores: &[CategoryScore], change_type: ChangeType) -> u32 {
        scores.iter().find(|s| s.change_type == change_type).unwrap().score
    }

    fn score_text(diff: &str) -> Vec<CategoryScore> {
        let files = affected_files(diff);
        DiffClassifier::default().scores(diff, &diff.to_lowercase(), &files)
    }

    #[test]
    fn table_is_in_declaration_order() {
        let order: Vec<_> = CATEGORY_RULES.iter().map(|r| r.change_type).collect();
        assert_eq!(
            order,
            vec![
                ChangeType::Feature,
                ChangeType::Bugfix,
                ChangeType::Refactor,
                ChangeType::Performance,
                ChangeType::Style,
                ChangeType::Test,
                ChangeType::Docs,
                ChangeType::Chore,
            ]
        );
    }

    #[test]
    fn file_indicators_score_per_file() {
        let diff = "diff --git a/tests/test_api.py b/tests/test_api.py\ndiff --git a/test_db.py b/test_db.py\n";
        let scores = score_text(diff);
        assert_eq!(score_of(&scores, ChangeType::Test), 6);
    }

    #[test]
    fn one_file_can_feed_several_categories() {
        // style.md hits both the style indicator and the docs indicator,
        // and the word "style" in the header also matches a style pattern.
        let scores = score_text("diff --git a/style.md b/style.md\n");
        assert_eq!(score_of(&scores, ChangeType::Docs), 3);
        assert_eq!(score_of(&scores, ChangeType::Style), 4);
    }

    #[test]
    fn content_patterns_count_once_each() {
        let scores = score_text("fix fix fix the bug\n");
        assert_eq!(score_of(&scores, ChangeType::Bugfix), 2);
    }

    #[test]
    fn content_patterns_are_case_insensitive() {
        let scores = score_text("OPTIMIZE the Cache\n");
        assert_eq!(score_of(&scores, ChangeType::Performance), 2);
    }

    #[test]
    fn structural_markers_add_bonuses() {
        let scores = score_text("deleted file mode 100644\nrename from a\n");
        assert_eq!(score_of(&scores, ChangeType::Chore), 2);
        assert_eq!(score_of(&scores, ChangeType::Refactor), 1);
    }

    #[test]
    fn ties_resolve_to_first_declared_category() {
        // "fix" (bugfix) and "refactor" (refactor) each score 1.
        let result = classify("refactor and fix\n");
        assert_eq!(result.change_type, ChangeType::Bugfix);
    }

    #[test]
    fn all_zero_scores_are_unknown() {
        let result = classify("diff --git a/logo.png b/logo.png\n");
        assert_eq!(result.change_type, ChangeType::Unknown);
    }

    #[test]
    fn whitespace_input_is_empty_result() {
        assert_eq!(classify("  \n\t "), ClassificationResult::empty());
        assert_eq!(
            DiffClassifier::default().classify_opt(None),
            ClassificationResult::empty()
        );
    }

    #[test]
    fn bugfix_evidence_bonus() {
        let mut diff = String::from("diff --git a/src/app.rs b/src/app.rs\n");
        for _ in 0..12 {
            diff.push_str("+    // fix the off-by-one bug\n");
        }
        let result = classify(&diff);
        assert_eq!(result.change_type, ChangeType::Bugfix);
        assert!((result.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn long_diff_penalty() {
        let mut diff = String::from("diff --git a/README.md b/README.md\n");
        for i in 0..150 {
            diff.push_str(&format!("+line {i}\n"));
        }
        let result = classify(&diff);
        assert_eq!(result.change_type, ChangeType::Docs);
        assert!((result.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_clamped() {
        let mut config = ClassifierConfig::default();
        config.confidence.base = 0.95;
        let classifier = DiffClassifier::new(config);
        let mut diff = String::from("diff --git a/docs/guide.md b/docs/guide.md\n");
        for _ in 0..20 {
            diff.push_str("+words\n");
        }
        assert_eq!(classifier.classify(&diff).confidence, 1.0);

        let mut config = ClassifierConfig::default();
        config.confidence.base = 0.05;
        let classifier = DiffClassifier::new(config);
        assert_eq!(classifier.classify("x").confidence, 0.0);
    }

    #[test]
    fn affected_components_are_capped() {
        let diff: String = (0..8)
            .map(|i| format!("diff --git a/src/m{i}.rs b/src/m{i}.rs\n"))
            .collect();
        let result = classify(&diff);
        assert_eq!(result.affected_components.len(), 5);
        assert_eq!(result.affected_components[0], "src/m0.rs");
        assert!(result.summary.contains("across 8 files: src/m0.rs, src/m1.rs, src/m2.rs..."));
    }

    #[test]
    fn summary_variants() {
        assert_eq!(
            summarize(ChangeType::Bugfix, &[]),
            "Detected bugfix changes with no clear file modifications"
        );
        assert_eq!(
            summarize(ChangeType::Docs, &["README.md".to_string()]),
            "Detected docs changes in README.md"
        );
        assert_eq!(
            summarize(ChangeType::Test, &["a".to_string(), "b".to_string(), "c".to_string()]),
            "Detected test changes across 3 files: a, b, c"
        );
    }

    #[test]
    fn weights_are_configurable() {
        let config = ClassifierConfig {
            file_indicator_weight: 10,
            ..ClassifierConfig::default()
        };
        let diff = "diff --git a/package.json b/package.json\n+fix\n";
        let files = affected_files(diff);
        let scores = DiffClassifier::new(config).scores(diff, &diff.to_lowercase(), &files);
        assert_eq!(score_of(&scores, ChangeType::Chore), 10);
    }
}
