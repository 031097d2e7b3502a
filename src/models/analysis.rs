//! Structured diff analysis types: symbol-level changes and per-file statistics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a function, class, or import changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SymbolChangeKind {
    Added,
    Removed,
    SignatureChanged,
    Modified,
}

/// Source language family, selected from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Python,
    Rust,
    JavaScript,
    Go,
    Jvm,
    CSharp,
    C,
    Ruby,
}

/// A change to a function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FunctionChange {
    pub name: String,
    pub change_type: SymbolChangeKind,
    pub old_signature: Option<String>,
    pub new_signature: Option<String>,
    pub file_path: String,
    pub line: Option<u32>,
}

/// A change to a class, struct, trait, interface, or similar type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassChange {
    pub name: String,
    pub change_type: SymbolChangeKind,
    pub old_signature: Option<String>,
    pub new_signature: Option<String>,
    pub file_path: String,
    pub line: Option<u32>,
}

/// An imported symbol that appeared or disappeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImportChange {
    /// The imported symbol (or the module itself for whole-module imports).
    pub name: String,
    /// The module the symbol is imported from, when the syntax names one.
    pub module: Option<String>,
    pub change_type: SymbolChangeKind,
    /// The import statement as it appears in the diff.
    pub statement: String,
    pub file_path: String,
    pub line: Option<u32>,
}

/// Line counts and flags for a single changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileStats {
    pub path: String,
    pub language: Option<Language>,
    pub lines_added: usize,
    pub lines_removed: usize,
    pub hunks: usize,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_renamed: bool,
    pub is_binary: bool,
}

/// Everything the structured extractor learned from one diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiffAnalysisResult {
    /// De-duplicated, first-seen-ordered file paths.
    pub files_modified: Vec<String>,
    pub total_lines_added: usize,
    pub total_lines_removed: usize,
    pub function_changes: Vec<FunctionChange>,
    pub class_changes: Vec<ClassChange>,
    pub import_changes: Vec<ImportChange>,
    pub file_stats: Vec<FileStats>,
}

impl DiffAnalysisResult {
    /// Returns `true` when no symbol-level change was detected.
    pub fn has_no_symbol_changes(&self) -> bool {
        self.function_changes.is_empty()
            && self.class_changes.is_empty()
            && self.import_changes.is_empty()
    }
}
