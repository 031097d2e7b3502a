//! Diff-related types: file changes, hunks, and diff lines.

use serde::{Deserialize, Serialize};

/// Placeholder path git uses for the missing side of a new or deleted file.
pub const DEV_NULL: &str = "/dev/null";

/// The kind of a line in a diff hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineKind {
    /// Line is unchanged (context).
    Context,
    /// Line exists only in the new version.
    Added,
    /// Line exists only in the old version.
    Removed,
}

/// A single line in a diff hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    /// The content of the line (without the leading +/-/space).
    pub content: String,
    /// Line number in the old file (None for added lines).
    pub old_line_no: Option<u32>,
    /// Line number in the new file (None for removed lines).
    pub new_line_no: Option<u32>,
}

/// One `@@ … @@` block of a file diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    /// Path on the old side, as named by the `diff --git` header.
    pub file_path_before: String,
    /// Path on the new side, as named by the `diff --git` header.
    pub file_path_after: String,
    pub old_start: u32,
    pub old_len: u32,
    pub new_start: u32,
    pub new_len: u32,
    /// Trailing text after the closing `@@` (often the enclosing function).
    pub section: Option<String>,
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// Iterate over the added lines of this hunk.
    pub fn added(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines.iter().filter(|l| l.kind == DiffLineKind::Added)
    }

    /// Iterate over the removed lines of this hunk.
    pub fn removed(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines.iter().filter(|l| l.kind == DiffLineKind::Removed)
    }

    /// Returns `true` if the hunk carries at least one added or removed line.
    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(|l| l.kind != DiffLineKind::Context)
    }
}

/// All hunks and header flags for a single logical file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub old_path: String,
    pub new_path: String,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_renamed: bool,
    pub is_binary: bool,
    pub hunks: Vec<DiffHunk>,
}

impl FileChange {
    /// Returns the most relevant file path (new path for non-deletes, old
    /// path for deletes). Never returns `/dev/null` while either side has a
    /// real path.
    pub fn file_path(&self) -> &str {
        let preferred = if self.is_deleted {
            &self.old_path
        } else {
            &self.new_path
        };
        if preferred == DEV_NULL {
            if self.is_deleted {
                &self.new_path
            } else {
                &self.old_path
            }
        } else {
            preferred
        }
    }

    /// Returns the total number of added lines across all hunks.
    pub fn added_lines(&self) -> usize {
        self.hunks.iter().map(|h| h.added().count()).sum()
    }

    /// Returns the total number of removed lines across all hunks.
    pub fn removed_lines(&self) -> usize {
        self.hunks.iter().map(|h| h.removed().count()).sum()
    }
}
