//! Markdown renderer.
//!
//! For consolidation this is the cleaned document itself, so the output
//! can be redirected straight back into a file.

use crate::models::{ClassificationResult, DeduplicationAnalysis, DiffAnalysisResult};
use crate::output::OutputRenderer;

pub struct MarkdownRenderer;

impl OutputRenderer for MarkdownRenderer {
    fn render_classification(&self, result: &ClassificationResult) -> String {
        let mut out = format!(
            "## Change classification\n\n- **Type:** {}\n- **Confidence:** {:.2}\n- **Summary:** {}\n",
            result.change_type, result.confidence, result.summary
        );
        if !result.affected_components.is_empty() {
            out.push_str("\n### Affected components\n\n");
            for component in &result.affected_components {
                out.push_str(&format!("- `{component}`\n"));
            }
        }
        out
    }

    fn render_analysis(&self, result: &DiffAnalysisResult) -> String {
        let mut out = format!(
            "## Structured changes\n\n{} files, +{} -{}\n",
            result.files_modified.len(),
            result.total_lines_added,
            result.total_lines_removed
        );

        let rows = result
            .function_changes
            .iter()
            .map(|c| ("function", &c.name, c.change_type, &c.file_path))
            .chain(
                result
                    .class_changes
                    .iter()
                    .map(|c| ("class", &c.name, c.change_type, &c.file_path)),
            )
            .chain(
                result
                    .import_changes
                    .iter()
                    .map(|c| ("import", &c.name, c.change_type, &c.file_path)),
            );

        let mut any = false;
        for (kind, name, change, file) in rows {
            if !any {
                out.push_str("\n| Kind | Name | Change | File |\n|---|---|---|---|\n");
                any = true;
            }
            out.push_str(&format!("| {kind} | `{name}` | {change} | `{file}` |\n"));
        }
        out
    }

    fn render_dedup(&self, result: &DeduplicationAnalysis) -> String {
        let mut out = result.cleaned_content.clone();
        out.push('\n');
        out
    }
}
