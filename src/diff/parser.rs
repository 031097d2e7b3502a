//! Unified diff format parser.
//!
//! Parses `git diff` output (unified format) into `Vec<FileChange>`.
//! Text without any `diff --git` header yields an empty list.

use std::iter::Peekable;
use std::str::Lines;

use crate::models::diff::{DiffHunk, DiffLine, DiffLineKind, FileChange};

/// Parse a unified diff string into a list of file changes.
pub fn parse_unified_diff(input: &str) -> Vec<FileChange> {
    let mut files: Vec<FileChange> = Vec::new();
    let mut lines = input.lines().peekable();

    while let Some(line) = lines.next() {
        if !line.starts_with("diff --git ") {
            continue;
        }

        let (old_path, new_path) = parse_diff_header(line);
        let mut file = FileChange {
            old_path,
            new_path,
            is_new: false,
            is_deleted: false,
            is_renamed: false,
            is_binary: false,
            hunks: Vec::new(),
        };

        // Extended headers until the next file; hunks are parsed inline.
        while let Some(&next) = lines.peek() {
            if next.starts_with("diff --git ") {
                break;
            }
            if next.starts_with("new file mode") {
                file.is_new = true;
                lines.next();
            } else if next.starts_with("deleted file mode") {
                file.is_deleted = true;
                lines.next();
            } else if next.starts_with("rename from") || next.starts_with("rename to") {
                file.is_renamed = true;
                lines.next();
            } else if next.starts_with("Binary files") || next.starts_with("GIT binary patch") {
                file.is_binary = true;
                lines.next();
            } else if next.starts_with("@@") {
                match parse_hunk(&mut lines, &file.old_path, &file.new_path) {
                    Some(hunk) => file.hunks.push(hunk),
                    None => tracing::trace!(header = next, "skipping malformed hunk header"),
                }
            } else {
                // index, mode, similarity, ---/+++ and anything unrecognised
                lines.next();
            }
        }

        files.push(file);
    }

    files
}

/// Parse the "diff --git a/path b/path" header line.
fn parse_diff_header(line: &str) -> (String, String) {
    let rest = line.strip_prefix("diff --git ").unwrap_or(line);

    // Paths are prefixed with a/ and b/ (default), or c/w/i/o/ when
    // git's diff.mnemonicPrefix is enabled. Paths may contain spaces.
    if let Some(b_idx) = find_second_prefix(rest) {
        let a_part = &rest[..b_idx];
        let b_part = &rest[b_idx + 1..];
        (
            strip_diff_prefix(a_part).to_string(),
            strip_diff_prefix(b_part).to_string(),
        )
    } else {
        let mut parts = rest.splitn(2, ' ');
        let old_path = strip_diff_prefix(parts.next().unwrap_or("")).to_string();
        let new_path = strip_diff_prefix(parts.next().unwrap_or("")).to_string();
        (old_path, new_path)
    }
}

/// Strip a single-character git diff prefix (`a/`, `b/`, `c/`, `w/`, `i/`, `o/`).
fn strip_diff_prefix(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 2
        && bytes[1] == b'/'
        && matches!(bytes[0], b'a' | b'b' | b'c' | b'w' | b'i' | b'o')
    {
        return &path[2..];
    }
    path
}

/// Find the position of the second path prefix separator in a diff header.
fn find_second_prefix(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    (1..bytes.len().saturating_sub(1)).find(|&i| {
        bytes[i] == b' '
            && bytes.get(i + 2) == Some(&b'/')
            && matches!(bytes.get(i + 1), Some(b'a' | b'b' | b'c' | b'w' | b'i' | b'o'))
    })
}

/// Parse a single hunk starting at an `@@` line.
///
/// Consumes the header line even when it is malformed, so the caller never
/// loops on it.
fn parse_hunk(lines: &mut Peekable<Lines<'_>>, old_path: &str, new_path: &str) -> Option<DiffHunk> {
    let header_line = lines.next()?;
    let (old_start, old_len, new_start, new_len, section) = parse_hunk_header(header_line)?;

    let mut hunk_lines: Vec<DiffLine> = Vec::new();
    let mut old_line = old_start;
    let mut new_line = new_start;

    while let Some(&next) = lines.peek() {
        if next.starts_with("diff --git ") || next.starts_with("@@") {
            break;
        }
        lines.next();

        if next.starts_with('\\') {
            // "\ No newline at end of file"
            continue;
        }

        if let Some(content) = next.strip_prefix('+') {
            hunk_lines.push(DiffLine {
                kind: DiffLineKind::Added,
                content: content.to_string(),
                old_line_no: None,
                new_line_no: Some(new_line),
            });
            new_line = new_line.saturating_add(1);
        } else if let Some(content) = next.strip_prefix('-') {
            hunk_lines.push(DiffLine {
                kind: DiffLineKind::Removed,
                content: content.to_string(),
                old_line_no: Some(old_line),
                new_line_no: None,
            });
            old_line = old_line.saturating_add(1);
        } else {
            // ' ' prefix, empty lines from stripped editors, or anything else
            let content = next.strip_prefix(' ').unwrap_or(next);
            hunk_lines.push(DiffLine {
                kind: DiffLineKind::Context,
                content: content.to_string(),
                old_line_no: Some(old_line),
                new_line_no: Some(new_line),
            });
            old_line = old_line.saturating_add(1);
            new_line = new_line.saturating_add(1);
        }
    }

    Some(DiffHunk {
        file_path_before: old_path.to_string(),
        file_path_after: new_path.to_string(),
        old_start,
        old_len,
        new_start,
        new_len,
        section,
        lines: hunk_lines,
    })
}

/// Parse a `@@ -old_start,old_len +new_start,new_len @@ section` line.
fn parse_hunk_header(line: &str) -> Option<(u32, u32, u32, u32, Option<String>)> {
    let line = line.strip_prefix("@@ ")?;
    let end = line.find(" @@")?;
    let range_part = &line[..end];
    let section = Some(line[end + 3..].trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let (old_range, new_range) = range_part.split_once(' ')?;
    let (old_start, old_len) = parse_range(old_range.strip_prefix('-')?)?;
    let (new_start, new_len) = parse_range(new_range.strip_prefix('+')?)?;

    Some((old_start, old_len, new_start, new_len, section))
}

/// Parse "start,len" or "start" (len defaults to 1).
fn parse_range(s: &str) -> Option<(u32, u32)> {
    if let Some((start, len)) = s.split_once(',') {
        Some((start.parse().ok()?, len.parse().ok()?))
    } else {
        Some((s.parse().ok()?, 1))
    }
}
