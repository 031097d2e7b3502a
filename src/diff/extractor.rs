//! Structured extraction of function, class, and import changes.
//!
//! Works on parsed hunks plus the per-language patterns in
//! [`super::languages`]. Declarations are paired by name within a file:
//!
//! | removed side | added side | result |
//! |---|---|---|
//! | — | declared | `added` |
//! | declared | — | `removed` |
//! | declared | declared, different text | `signature_changed` |
//! | declared | declared, identical text | `modified` |
//!
//! A hunk whose `@@ … @@` section names a declaration that was not already
//! recorded marks that symbol `modified`. Imports pair on
//! `(module, name)` and are only reported when they appear on one side.
//!
//! Files in unknown languages, binary files, and non-diff text yield no
//! symbol records.

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::models::analysis::{
    ClassChange, DiffAnalysisResult, FileStats, FunctionChange, ImportChange, SymbolChangeKind,
};
use crate::models::classification::ChangeType;
use crate::models::diff::{DiffLine, DiffLineKind, FileChange};

use super::files::affected_files;
use super::languages::{Declaration, ImportedSymbol, LanguageRules, detect_language, rules_for_path};
use super::parser::parse_unified_diff;

/// Extract structured changes with no ordering preference.
pub fn extract(diff: &str) -> DiffAnalysisResult {
    extract_with_hint(diff, None)
}

/// Extract structured changes, ordering function and class records by
/// the kinds most relevant to `hint`. The hint never adds or drops records.
pub fn extract_with_hint(diff: &str, hint: Option<ChangeType>) -> DiffAnalysisResult {
    let (total_lines_added, total_lines_removed) = count_changed_lines(diff);
    let files = parse_unified_diff(diff);

    let per_file: Vec<FileSymbols> = files.par_iter().map(extract_file_symbols).collect();

    let mut result = DiffAnalysisResult {
        files_modified: affected_files(diff),
        total_lines_added,
        total_lines_removed,
        file_stats: files.iter().map(file_stats).collect(),
        ..DiffAnalysisResult::default()
    };
    for symbols in per_file {
        result.function_changes.extend(symbols.functions);
        result.class_changes.extend(symbols.classes);
        result.import_changes.extend(symbols.imports);
    }

    let priority = kind_priority(hint);
    if !priority.is_empty() {
        let rank = |kind: SymbolChangeKind| {
            priority.iter().position(|k| *k == kind).unwrap_or(priority.len())
        };
        result.function_changes.sort_by_key(|c| rank(c.change_type));
        result.class_changes.sort_by_key(|c| rank(c.change_type));
    }

    tracing::debug!(
        files = result.files_modified.len(),
        added = result.total_lines_added,
        removed = result.total_lines_removed,
        functions = result.function_changes.len(),
        classes = result.class_changes.len(),
        imports = result.import_changes.len(),
        ?hint,
        "extracted structured diff"
    );

    result
}

/// Count `+`/`-` content lines over the raw text, skipping file markers.
fn count_changed_lines(diff: &str) -> (usize, usize) {
    diff.lines().fold((0, 0), |(added, removed), line| {
        if line.starts_with('+') && !line.starts_with("+++") {
            (added + 1, removed)
        } else if line.starts_with('-') && !line.starts_with("---") {
            (added, removed + 1)
        } else {
            (added, removed)
        }
    })
}

fn kind_priority(hint: Option<ChangeType>) -> &'static [SymbolChangeKind] {
    use SymbolChangeKind::*;
    match hint {
        Some(ChangeType::Feature) => &[Added, SignatureChanged, Modified, Removed],
        Some(ChangeType::Bugfix | ChangeType::Performance) => {
            &[Modified, SignatureChanged, Added, Removed]
        }
        Some(ChangeType::Refactor) => &[SignatureChanged, Removed, Modified, Added],
        _ => &[],
    }
}

fn file_stats(file: &FileChange) -> FileStats {
    let path = file.file_path();
    FileStats {
        path: path.to_string(),
        language: detect_language(path),
        lines_added: file.added_lines(),
        lines_removed: file.removed_lines(),
        hunks: file.hunks.len(),
        is_new: file.is_new,
        is_deleted: file.is_deleted,
        is_renamed: file.is_renamed,
        is_binary: file.is_binary,
    }
}

#[derive(Debug, Default)]
struct FileSymbols {
    functions: Vec<FunctionChange>,
    classes: Vec<ClassChange>,
    imports: Vec<ImportChange>,
}

/// A declaration seen on one side of the diff.
#[derive(Debug, Clone)]
struct Sighting {
    signature: String,
    line: Option<u32>,
}

/// Removed/added sightings for one name, in first-seen order.
#[derive(Debug, Default)]
struct Pairing {
    removed: Option<Sighting>,
    added: Option<Sighting>,
}

impl Pairing {
    fn record(&mut self, kind: DiffLineKind, sighting: Sighting) {
        let slot = match kind {
            DiffLineKind::Added => &mut self.added,
            DiffLineKind::Removed => &mut self.removed,
            DiffLineKind::Context => return,
        };
        if slot.is_none() {
            *slot = Some(sighting);
        }
    }
}

/// Resolved change for one declaration name.
struct Resolved {
    name: String,
    change_type: SymbolChangeKind,
    old_signature: Option<String>,
    new_signature: Option<String>,
    line: Option<u32>,
}

fn extract_file_symbols(file: &FileChange) -> FileSymbols {
    if file.is_binary {
        return FileSymbols::default();
    }
    let path = file.file_path();
    let Some(rules) = rules_for_path(path) else {
        tracing::trace!(path, "no declaration patterns for file");
        return FileSymbols::default();
    };

    let mut functions: IndexMap<String, Pairing> = IndexMap::new();
    let mut classes: IndexMap<String, Pairing> = IndexMap::new();
    let mut imports: IndexMap<ImportedSymbol, (Option<ImportSighting>, Option<ImportSighting>)> =
        IndexMap::new();

    for line in file.hunks.iter().flat_map(|h| &h.lines) {
        if line.kind == DiffLineKind::Context {
            continue;
        }
        let line_no = line_number(line);

        if let Some(decl) = rules.match_class(&line.content) {
            record(&mut classes, line.kind, decl, line_no);
        } else if let Some(decl) = rules.match_function(&line.content) {
            record(&mut functions, line.kind, decl, line_no);
        }

        for symbol in rules.match_imports(&line.content) {
            let entry = imports.entry(symbol).or_default();
            let slot = if line.kind == DiffLineKind::Added {
                &mut entry.1
            } else {
                &mut entry.0
            };
            if slot.is_none() {
                *slot = Some(ImportSighting {
                    statement: line.content.trim().to_string(),
                    line: line_no,
                });
            }
        }
    }

    let mut resolved_functions = resolve(functions);
    let mut resolved_classes = resolve(classes);
    mark_modified_from_sections(file, rules, &mut resolved_functions, &mut resolved_classes);

    FileSymbols {
        functions: resolved_functions
            .into_iter()
            .map(|r| FunctionChange {
                name: r.name,
                change_type: r.change_type,
                old_signature: r.old_signature,
                new_signature: r.new_signature,
                file_path: path.to_string(),
                line: r.line,
            })
            .collect(),
        classes: resolved_classes
            .into_iter()
            .map(|r| ClassChange {
                name: r.name,
                change_type: r.change_type,
                old_signature: r.old_signature,
                new_signature: r.new_signature,
                file_path: path.to_string(),
                line: r.line,
            })
            .collect(),
        imports: resolve_imports(imports, path),
    }
}

fn line_number(line: &DiffLine) -> Option<u32> {
    match line.kind {
        DiffLineKind::Removed => line.old_line_no,
        _ => line.new_line_no,
    }
}

fn record(map: &mut IndexMap<String, Pairing>, kind: DiffLineKind, decl: Declaration, line: Option<u32>) {
    map.entry(decl.name).or_default().record(
        kind,
        Sighting {
            signature: decl.signature,
            line,
        },
    );
}

fn resolve(map: IndexMap<String, Pairing>) -> Vec<Resolved> {
    map.into_iter()
        .filter_map(|(name, pairing)| {
            let (change_type, old, new, line) = match (pairing.removed, pairing.added) {
                (None, Some(added)) => (SymbolChangeKind::Added, None, Some(added.signature), added.line),
                (Some(removed), None) => {
                    (SymbolChangeKind::Removed, Some(removed.signature), None, removed.line)
                }
                (Some(removed), Some(added)) => {
                    let kind = if removed.signature == added.signature {
                        SymbolChangeKind::Modified
                    } else {
                        SymbolChangeKind::SignatureChanged
                    };
                    (kind, Some(removed.signature), Some(added.signature), added.line)
                }
                (None, None) => return None,
            };
            Some(Resolved {
                name,
                change_type,
                old_signature: old,
                new_signature: new,
                line,
            })
        })
        .collect()
}

/// Record symbols whose bodies changed, using the enclosing declaration
/// git prints after each hunk range.
fn mark_modified_from_sections(
    file: &FileChange,
    rules: &LanguageRules,
    functions: &mut Vec<Resolved>,
    classes: &mut Vec<Resolved>,
) {
    for hunk in file.hunks.iter().filter(|h| h.has_changes()) {
        let Some(section) = hunk.section.as_deref() else {
            continue;
        };
        let (decl, target) = if let Some(decl) = rules.match_class(section) {
            (decl, &mut *classes)
        } else if let Some(decl) = rules.match_function(section) {
            (decl, &mut *functions)
        } else {
            continue;
        };
        if target.iter().any(|r| r.name == decl.name) {
            continue;
        }
        target.push(Resolved {
            name: decl.name,
            change_type: SymbolChangeKind::Modified,
            old_signature: None,
            new_signature: Some(decl.signature),
            line: Some(hunk.new_start),
        });
    }
}

#[derive(Debug, Clone)]
struct ImportSighting {
    statement: String,
    line: Option<u32>,
}

fn resolve_imports(
    imports: IndexMap<ImportedSymbol, (Option<ImportSighting>, Option<ImportSighting>)>,
    path: &str,
) -> Vec<ImportChange> {
    imports
        .into_iter()
        .filter_map(|(symbol, sides)| {
            let (change_type, sighting) = match sides {
                (None, Some(added)) => (SymbolChangeKind::Added, added),
                (Some(removed), None) => (SymbolChangeKind::Removed, removed),
                _ => return None,
            };
            Some(ImportChange {
                name: symbol.name,
                module: symbol.module,
                change_type,
                statement: sighting.statement,
                file_path: path.to_string(),
                line: sighting.line,
            })
        })
        .collect()
}
