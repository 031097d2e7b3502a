//! Markdown section splitting.
//!
//! A document is cut at ATX headers (`#` to `######` followed by
//! whitespace and text). Text before the first header becomes a preamble
//! section with an empty header. Lines inside fenced code blocks are never
//! treated as headers, so shell comments in examples stay put.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::section::Section;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").unwrap());

/// Blockquoted quality-score annotations such as `> **Quality Score: 8/10**`.
static SCORE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*>\s*\*\*[^*]*score[^*]*\*\*").unwrap());

/// Characters dropped from the similarity key: emphasis, code, and link syntax.
const MARKUP_CHARS: &[char] = &['*', '_', '`', '[', ']', '(', ')'];

/// Split markdown into sections in document order.
///
/// Sections with neither a header nor any non-blank content are dropped.
pub fn parse_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = OpenSection::preamble();
    let mut in_fence = false;
    let mut last_line = 0;

    for (idx, line) in markdown.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;

        if is_fence(line) {
            in_fence = !in_fence;
        }

        let header = if in_fence || is_fence(line) {
            None
        } else {
            HEADER_RE.captures(line)
        };

        match header {
            Some(caps) => {
                current.close(line_no.saturating_sub(1), &mut sections);
                current = OpenSection {
                    header: caps[2].trim().to_string(),
                    level: caps[1].len(),
                    line_start: line_no,
                    body: Vec::new(),
                };
            }
            None => current.body.push(line),
        }
    }

    current.close(last_line, &mut sections);
    sections
}

/// Build a section from its parts, computing the similarity key.
pub fn build_section(
    header: impl Into<String>,
    content: impl Into<String>,
    level: usize,
    line_start: usize,
    line_end: usize,
) -> Section {
    let content = content.into();
    Section {
        similarity_hash: similarity_key(&content),
        header: header.into(),
        content,
        level,
        line_start,
        line_end,
    }
}

/// Normalize content for comparison.
///
/// Drops quality-score annotation lines and markup punctuation, collapses
/// whitespace runs to single spaces, and lowercases.
pub fn similarity_key(content: &str) -> String {
    let stripped: String = content
        .lines()
        .filter(|line| !SCORE_LINE_RE.is_match(line))
        .flat_map(|line| line.chars().chain(std::iter::once('\n')))
        .filter(|c| !MARKUP_CHARS.contains(c))
        .collect();

    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `content` opens a fenced code block it never closes.
pub fn has_open_fence(content: &str) -> bool {
    content.lines().filter(|line| is_fence(line)).count() % 2 == 1
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

struct OpenSection<'a> {
    header: String,
    level: usize,
    line_start: usize,
    body: Vec<&'a str>,
}

impl OpenSection<'_> {
    fn preamble() -> Self {
        Self {
            header: String::new(),
            level: 1,
            line_start: 1,
            body: Vec::new(),
        }
    }

    fn close(&mut self, line_end: usize, out: &mut Vec<Section>) {
        let content = self.body.join("\n").trim().to_string();
        if self.header.is_empty() && content.is_empty() {
            return;
        }
        out.push(build_section(
            std::mem::take(&mut self.header),
            content,
            self.level,
            self.line_start,
            line_end.max(self.line_start),
        ));
    }
}
