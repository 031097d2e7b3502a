//! Output renderers: terminal, JSON, and markdown.

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::models::{ChangeReport, ClassificationResult, DeduplicationAnalysis, DiffAnalysisResult};

/// Renders engine results to a string for printing.
pub trait OutputRenderer {
    fn render_classification(&self, result: &ClassificationResult) -> String;

    fn render_analysis(&self, result: &DiffAnalysisResult) -> String;

    /// Classification and analysis together, as produced by `analyze`.
    fn render_report(&self, report: &ChangeReport) -> String {
        format!(
            "{}\n{}",
            self.render_classification(&report.classification),
            self.render_analysis(&report.analysis)
        )
    }

    fn render_dedup(&self, result: &DeduplicationAnalysis) -> String;
}
