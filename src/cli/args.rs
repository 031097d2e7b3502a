//! Clap argument types and input resolution.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use changelens::models::{ChangeType, InputSource};
use changelens::output::OutputRenderer;
use changelens::output::json::{JsonRenderer, SchemaKind};
use changelens::output::markdown::MarkdownRenderer;
use changelens::output::terminal::TerminalRenderer;

/// Classify diffs, extract symbol changes, and consolidate duplicated markdown.
#[derive(Parser, Debug)]
#[command(name = "changelens", version = changelens::constants::VERSION)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "terminal")]
    pub format: OutputFormat,

    /// Working directory holding `.changelens.toml` (default: current directory).
    #[arg(long, global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log debug output to stderr.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Classify a unified diff by change type.
    Classify(InputArgs),

    /// Extract function, class, and import changes from a unified diff.
    Extract {
        #[command(flatten)]
        input: InputArgs,

        /// Order results for this change type (e.g. feature, bugfix).
        #[arg(long)]
        hint: Option<ChangeType>,
    },

    /// Classify a diff and extract its symbol changes in one pass.
    Analyze(InputArgs),

    /// Merge near-duplicate sections of a markdown document.
    Dedup {
        #[command(flatten)]
        input: InputArgs,

        /// Similarity threshold in (0, 1]; overrides config and environment.
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Print the JSON Schema of a `--format json` output.
    Schema {
        /// Which output to describe.
        #[arg(value_enum)]
        kind: SchemaKind,
    },

    /// Print version and build information.
    Version,
}

/// Where to read input from.
#[derive(Parser, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input file. Reads stdin when omitted or `-`.
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn source(&self) -> InputSource {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path.clone()),
            _ => InputSource::Stdin,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

impl OutputFormat {
    /// The renderer for this format.
    pub fn renderer(&self) -> Box<dyn OutputRenderer> {
        match self {
            OutputFormat::Terminal => Box::new(TerminalRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
            OutputFormat::Markdown => Box::new(MarkdownRenderer),
        }
    }
}
