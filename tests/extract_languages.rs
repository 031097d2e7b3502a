//! Integration tests for structured extraction across language families.

use changelens::diff::{self, DiffClassifier};
use changelens::models::{ChangeType, Language, SymbolChangeKind};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

#[test]
fn functions_across_rust_go_and_typescript() {
    let result = diff::extract(&fixture("multi_language.diff"));

    let functions: Vec<_> = result
        .function_changes
        .iter()
        .map(|c| (c.file_path.as_str(), c.name.as_str(), c.change_type, c.line))
        .collect();
    assert_eq!(
        functions,
        vec![
            ("src/store.rs", "open", SymbolChangeKind::SignatureChanged, Some(8)),
            ("src/store.rs", "sync_all", SymbolChangeKind::Added, Some(10)),
            ("cmd/server/main.go", "serve", SymbolChangeKind::Removed, Some(6)),
            ("cmd/server/main.go", "ServeHTTP", SymbolChangeKind::Added, Some(11)),
            ("web/api.ts", "fetchUser", SymbolChangeKind::Added, Some(5)),
            ("web/api.ts", "saveUser", SymbolChangeKind::Added, Some(7)),
        ]
    );

    let open = &result.function_changes[0];
    assert_eq!(open.old_signature.as_deref(), Some("pub fn open(path: &str) -> Store"));
    assert_eq!(
        open.new_signature.as_deref(),
        Some("pub fn open(path: &str, readonly: bool) -> Store")
    );
}

#[test]
fn classes_across_languages() {
    let result = diff::extract(&fixture("multi_language.diff"));
    let classes: Vec<_> = result
        .class_changes
        .iter()
        .map(|c| (c.name.as_str(), c.change_type))
        .collect();
    assert_eq!(
        classes,
        vec![
            ("Handler", SymbolChangeKind::Added),
            ("Client", SymbolChangeKind::Added),
        ]
    );
}

#[test]
fn imports_across_languages() {
    let result = diff::extract(&fixture("multi_language.diff"));
    let imports: Vec<_> = result
        .import_changes
        .iter()
        .map(|c| (c.name.as_str(), c.module.as_deref(), c.change_type))
        .collect();
    assert_eq!(
        imports,
        vec![
            ("HashMap", Some("std::collections"), SymbolChangeKind::Removed),
            ("BTreeMap", Some("std::collections"), SymbolChangeKind::Added),
            ("Arc", Some("std::sync"), SymbolChangeKind::Added),
            ("net/http", None, SymbolChangeKind::Added),
            ("get", Some("./http"), SymbolChangeKind::Added),
            ("post", Some("./http"), SymbolChangeKind::Added),
        ]
    );
}

#[test]
fn totals_and_file_stats() {
    let result = diff::extract(&fixture("multi_language.diff"));

    assert_eq!(
        result.files_modified,
        vec!["src/store.rs", "cmd/server/main.go", "web/api.ts"]
    );
    assert_eq!(result.total_lines_added, 19);
    assert_eq!(result.total_lines_removed, 4);

    let stats: Vec<_> = result
        .file_stats
        .iter()
        .map(|s| (s.language, s.lines_added, s.lines_removed, s.is_new))
        .collect();
    assert_eq!(
        stats,
        vec![
            (Some(Language::Rust), 6, 3, false),
            (Some(Language::Go), 6, 1, false),
            (Some(Language::JavaScript), 7, 0, true),
        ]
    );
}

#[test]
fn feature_hint_puts_additions_first() {
    let result = diff::extract_with_hint(&fixture("multi_language.diff"), Some(ChangeType::Feature));
    let order: Vec<_> = result.function_changes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        order,
        vec!["sync_all", "ServeHTTP", "fetchUser", "saveUser", "open", "serve"]
    );
}

#[test]
fn hint_never_changes_the_record_set() {
    let text = fixture("multi_language.diff");
    let plain = diff::extract(&text);

    for hint in [ChangeType::Feature, ChangeType::Bugfix, ChangeType::Refactor, ChangeType::Docs] {
        let hinted = diff::extract_with_hint(&text, Some(hint));
        let mut a: Vec<_> = plain.function_changes.iter().map(|c| &c.name).collect();
        let mut b: Vec<_> = hinted.function_changes.iter().map(|c| &c.name).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b, "hint {hint}");
        assert_eq!(plain.import_changes, hinted.import_changes);
        assert_eq!(plain.total_lines_added, hinted.total_lines_added);
    }
}

#[test]
fn java_and_ruby_declarations() {
    let diff = "\
diff --git a/src/main/java/app/Service.java b/src/main/java/app/Service.java
--- a/src/main/java/app/Service.java
+++ b/src/main/java/app/Service.java
@@ -1,3 +1,4 @@
 package app;
+import java.util.List;
 public class Service {
-    public int count() {
+    public long count() {
diff --git a/lib/billing.rb b/lib/billing.rb
--- a/lib/billing.rb
+++ b/lib/billing.rb
@@ -1,2 +1,4 @@
+require 'json'
 class Invoice
+  def total?
+  end
";
    let result = diff::extract(diff);

    let functions: Vec<_> = result
        .function_changes
        .iter()
        .map(|c| (c.name.as_str(), c.change_type))
        .collect();
    assert_eq!(
        functions,
        vec![
            ("count", SymbolChangeKind::SignatureChanged),
            ("total?", SymbolChangeKind::Added),
        ]
    );

    let imports: Vec<_> = result.import_changes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(imports, vec!["List", "json"]);
}

#[test]
fn analyze_uses_classification_as_hint() {
    let report = diff::analyze(&fixture("new_feature.diff"), &DiffClassifier::default());

    assert_eq!(report.classification.change_type, ChangeType::Feature);
    let names: Vec<_> = report
        .analysis
        .function_changes
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["new_feature", "summarize_totals"]);
    assert_eq!(report.analysis.import_changes[0].name, "json");
}

#[test]
fn non_diff_text_yields_nothing() {
    let result = diff::extract("just some prose\nwith + and - signs\n");
    assert!(result.files_modified.is_empty());
    assert!(result.has_no_symbol_changes());
    assert!(result.file_stats.is_empty());
}
