//! Terminal renderer: styled flowing text, no tables.

use colored::Colorize;

use crate::models::{
    ClassificationResult, DeduplicationAnalysis, DiffAnalysisResult, SymbolChangeKind,
};
use crate::output::OutputRenderer;

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

const RULE: &str = "───────────────────────────────────";

fn kind_marker(kind: SymbolChangeKind) -> String {
    match kind {
        SymbolChangeKind::Added => "+".green().bold().to_string(),
        SymbolChangeKind::Removed => "-".red().bold().to_string(),
        SymbolChangeKind::SignatureChanged => "~".yellow().bold().to_string(),
        SymbolChangeKind::Modified => "*".blue().bold().to_string(),
    }
}

fn symbol_line(
    kind: SymbolChangeKind,
    name: &str,
    file_path: &str,
    line: Option<u32>,
    signature: Option<&str>,
) -> String {
    let location = match line {
        Some(line) => format!("{file_path}:{line}"),
        None => file_path.to_string(),
    };
    let mut out = format!(
        "   {} {} {} in {}\n",
        kind_marker(kind),
        name.bold(),
        format!("({kind})").dimmed(),
        location
    );
    if let Some(signature) = signature {
        out.push_str(&format!("     {}\n", signature.dimmed()));
    }
    out
}

impl OutputRenderer for TerminalRenderer {
    fn render_classification(&self, result: &ClassificationResult) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            " {} {}  {}\n",
            "type:".dimmed(),
            result.change_type.to_string().cyan().bold(),
            format!("confidence {:.2}", result.confidence).dimmed()
        ));
        output.push_str(&format!(" {}\n", result.summary));
        for component in &result.affected_components {
            output.push_str(&format!("   {} {}\n", "→".cyan(), component));
        }
        output
    }

    fn render_analysis(&self, result: &DiffAnalysisResult) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            " {} files, {} {}\n",
            result.files_modified.len().to_string().bold(),
            format!("+{}", result.total_lines_added).green(),
            format!("-{}", result.total_lines_removed).red(),
        ));

        if result.has_no_symbol_changes() {
            output.push_str(&format!("{}", "  ✔ No symbol-level changes.\n".green()));
            return output;
        }

        if !result.function_changes.is_empty() {
            output.push_str(&format!("\n {}\n", "Functions".bold()));
            for change in &result.function_changes {
                let signature = change
                    .new_signature
                    .as_deref()
                    .or(change.old_signature.as_deref());
                output.push_str(&symbol_line(
                    change.change_type,
                    &change.name,
                    &change.file_path,
                    change.line,
                    signature,
                ));
            }
        }

        if !result.class_changes.is_empty() {
            output.push_str(&format!("\n {}\n", "Classes".bold()));
            for change in &result.class_changes {
                output.push_str(&symbol_line(
                    change.change_type,
                    &change.name,
                    &change.file_path,
                    change.line,
                    None,
                ));
            }
        }

        if !result.import_changes.is_empty() {
            output.push_str(&format!("\n {}\n", "Imports".bold()));
            for change in &result.import_changes {
                output.push_str(&symbol_line(
                    change.change_type,
                    &change.name,
                    &change.file_path,
                    change.line,
                    Some(&change.statement),
                ));
            }
        }

        output
    }

    fn render_dedup(&self, result: &DeduplicationAnalysis) -> String {
        let mut output = String::new();

        if result.deduplicated {
            for merged in &result.merged_sections {
                output.push_str(&format!(" {} {}\n", "⇢".yellow().bold(), merged));
            }
        } else {
            output.push_str(&format!("{}", "  ✔ No duplicate sections found.\n".green()));
        }

        output.push_str(&format!("{}\n", RULE.dimmed()));
        output.push_str(&format!(
            " {} → {} sections, {} characters saved\n",
            result.original_sections.to_string().bold(),
            result.deduplicated_sections.to_string().bold(),
            result.space_saved.to_string().bold(),
        ));
        output
    }
}
