//! JSON output renderer.
//!
//! Emits the result types as pretty-printed JSON with snake_case keys, and
//! the JSON Schema describing each of them.

use clap::ValueEnum;
use schemars::{Schema, schema_for};
use serde::Serialize;

use crate::models::{ChangeReport, ClassificationResult, DeduplicationAnalysis, DiffAnalysisResult};
use crate::output::OutputRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Which JSON document a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    /// Output of `classify`.
    Classification,
    /// Output of `extract`.
    Analysis,
    /// Output of `analyze`.
    Report,
    /// Output of `dedup`.
    Dedup,
}

/// The JSON Schema for one kind of JSON output.
pub fn output_schema(kind: SchemaKind) -> Schema {
    match kind {
        SchemaKind::Classification => schema_for!(ClassificationResult),
        SchemaKind::Analysis => schema_for!(DiffAnalysisResult),
        SchemaKind::Report => schema_for!(ChangeReport),
        SchemaKind::Dedup => schema_for!(DeduplicationAnalysis),
    }
}

/// Pretty-printed JSON Schema for one kind of JSON output.
pub fn render_schema(kind: SchemaKind) -> String {
    to_json(&output_schema(kind))
}

impl OutputRenderer for JsonRenderer {
    fn render_classification(&self, result: &ClassificationResult) -> String {
        to_json(result)
    }

    fn render_analysis(&self, result: &DiffAnalysisResult) -> String {
        to_json(result)
    }

    fn render_report(&self, report: &ChangeReport) -> String {
        to_json(report)
    }

    fn render_dedup(&self, result: &DeduplicationAnalysis) -> String {
        to_json(result)
    }
}
