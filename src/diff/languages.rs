//! Per-language declaration and import patterns.
//!
//! Symbol detection works on single diff lines, not a parsed AST, so each
//! language family carries a small set of line-anchored regexes:
//!
//! - **functions** and **classes** capture a `name` group.
//! - **imports** capture an optional `module` group and an optional
//!   comma-separated `names` group. Without `names`, the module itself is
//!   the imported symbol.
//!
//! Patterns are tried in order and the first match wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::analysis::Language;

/// Words that declaration patterns can pick up from control flow
/// (`else if (x) {`) and that are never real declaration names.
const RESERVED_NAMES: &[&str] = &[
    "if", "else", "for", "while", "switch", "return", "catch", "sizeof", "new", "delete", "do",
    "try", "case", "elif", "with", "match", "loop", "throw",
];

/// Statement keywords that can lead a line shaped like a C declaration
/// (`return compute(a,`).
const STATEMENT_KEYWORDS: &[&str] = &["return", "throw", "else", "case", "goto", "delete", "new"];

/// A function or class declaration found on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// The declaration text, trimmed and without a trailing `{`.
    pub signature: String,
}

/// One symbol brought in by an import statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportedSymbol {
    pub name: String,
    pub module: Option<String>,
}

/// Compiled patterns for one language family.
#[derive(Debug)]
pub struct LanguageRules {
    pub language: Language,
    extensions: &'static [&'static str],
    functions: Vec<Regex>,
    classes: Vec<Regex>,
    imports: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

static RULES: LazyLock<Vec<LanguageRules>> = LazyLock::new(|| {
    vec![
        LanguageRules {
            language: Language::Python,
            extensions: &["py", "pyi", "pyw"],
            functions: compile(&[r"^\s*(?:async\s+)?def\s+(?P<name>[A-Za-z_]\w*)\s*\("]),
            classes: compile(&[r"^\s*class\s+(?P<name>[A-Za-z_]\w*)\s*[(:]"]),
            imports: compile(&[
                r"^\s*from\s+(?P<module>[\w.]+)\s+import\s+(?P<names>.+)$",
                r"^\s*import\s+(?P<names>[\w.]+(?:\s+as\s+\w+)?(?:\s*,\s*[\w.]+(?:\s+as\s+\w+)?)*)\s*$",
            ]),
        },
        LanguageRules {
            language: Language::Rust,
            extensions: &["rs"],
            functions: compile(&[
                r#"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:default\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"[^"]*"\s+)?fn\s+(?P<name>[A-Za-z_]\w*)"#,
            ]),
            classes: compile(&[
                r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum|trait|union)\s+(?P<name>[A-Za-z_]\w*)",
            ]),
            imports: compile(&[
                r"^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+(?P<module>[\w:]+)::\{(?P<names>[^}]*)\}",
                r"^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+(?:(?P<module>[\w:]+)::)?(?P<names>(?:\*|\w+)(?:\s+as\s+\w+)?)\s*;",
            ]),
        },
        LanguageRules {
            language: Language::JavaScript,
            extensions: &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts", "vue", "svelte"],
            functions: compile(&[
                r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)\s*[(<]",
                r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)",
            ]),
            classes: compile(&[
                r"^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?(?:class|interface)\s+(?P<name>[A-Za-z_$][\w$]*)",
            ]),
            imports: compile(&[
                r#"^\s*import\s+(?:type\s+)?(?P<names>.+?)\s+from\s+['"](?P<module>[^'"]+)['"]"#,
                r#"^\s*import\s+['"](?P<module>[^'"]+)['"]"#,
                r#"require\(\s*['"](?P<module>[^'"]+)['"]\s*\)"#,
            ]),
        },
        LanguageRules {
            language: Language::Go,
            extensions: &["go"],
            functions: compile(&[r"^\s*func\s+(?:\([^)]*\)\s*)?(?P<name>[A-Za-z_]\w*)\s*[(\[]"]),
            classes: compile(&[r"^\s*type\s+(?P<name>[A-Za-z_]\w*)\s+(?:struct|interface)\b"]),
            imports: compile(&[
                r#"^\s*import\s+(?:[\w.]+\s+)?"(?P<module>[^"]+)""#,
                r#"^\s*(?:[\w.]+\s+)?"(?P<module>[^"]+)"\s*$"#,
            ]),
        },
        LanguageRules {
            language: Language::Jvm,
            extensions: &["java", "kt", "kts", "scala", "groovy"],
            functions: compile(&[
                r"^\s*(?:@\w+\s+)*(?:(?:public|private|protected|static|final|abstract|synchronized|native|default|strictfp)\s+)+(?:<[^>]+>\s+)?[\w<>\[\],.?]+\s+(?P<name>[A-Za-z_]\w*)\s*\(",
                r"^\s*(?:(?:public|private|protected|internal|override|open|suspend|inline|abstract|final|operator|infix|tailrec)\s+)*fun\s+(?:<[^>]*>\s*)?(?:[\w.]+\.)?(?P<name>[A-Za-z_]\w*)\s*\(",
                r"^\s*(?:(?:override|private|protected|final|implicit)\s+)*def\s+(?P<name>[A-Za-z_]\w*)",
            ]),
            classes: compile(&[
                r"^\s*(?:@\w+\s+)*(?:(?:public|private|protected|internal|abstract|final|static|sealed|open|data|case|enum|inner)\s+)*(?:class|interface|enum|object|record|trait)\s+(?P<name>[A-Za-z_]\w*)",
            ]),
            imports: compile(&[r"^\s*import\s+(?:static\s+)?(?P<module>[\w.]+)\.(?P<names>\w+|\*)\s*;?\s*$"]),
        },
        LanguageRules {
            language: Language::CSharp,
            extensions: &["cs"],
            functions: compile(&[
                r"^\s*(?:\[[^\]]*\]\s*)*(?:(?:public|private|protected|internal|static|virtual|override|abstract|sealed|async|extern|unsafe|new|partial)\s+)+[\w<>\[\],.?]+\s+(?P<name>[A-Za-z_]\w*)\s*[(<]",
            ]),
            classes: compile(&[
                r"^\s*(?:(?:public|private|protected|internal|static|abstract|sealed|partial|readonly)\s+)*(?:class|interface|struct|record|enum)\s+(?P<name>[A-Za-z_]\w*)",
            ]),
            imports: compile(&[r"^\s*using\s+(?:static\s+)?(?P<module>[\w.]+)\s*;"]),
        },
        LanguageRules {
            language: Language::C,
            extensions: &["c", "h", "cc", "cpp", "cxx", "hpp", "hh", "hxx"],
            functions: compile(&[
                r"^\s*(?:(?:static|inline|extern|virtual|constexpr|const|unsigned|signed)\s+)*[A-Za-z_][\w:<>]*[\s*&]+(?P<name>[A-Za-z_~][\w:~]*)\s*\([^;]*$",
            ]),
            classes: compile(&[
                r"^\s*(?:template\s*<[^>]*>\s*)?(?:class|struct)\s+(?P<name>[A-Za-z_]\w*)\s*(?:final\s*)?(?:[:{]|$)",
            ]),
            imports: compile(&[r#"^\s*#\s*include\s*[<"](?P<module>[^>"]+)[>"]"#]),
        },
        LanguageRules {
            language: Language::Ruby,
            extensions: &["rb", "rake"],
            functions: compile(&[r"^\s*def\s+(?:self\.)?(?P<name>[A-Za-z_]\w*[?!=]?)"]),
            classes: compile(&[r"^\s*(?:class|module)\s+(?P<name>[A-Z]\w*(?:::\w+)*)"]),
            imports: compile(&[r#"^\s*require(?:_relative)?\s*\(?\s*['"](?P<module>[^'"]+)['"]"#]),
        },
    ]
});

/// Pick the language family for a path from its extension.
pub fn detect_language(path: &str) -> Option<Language> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    RULES
        .iter()
        .find(|rules| rules.extensions.contains(&ext.as_str()))
        .map(|rules| rules.language)
}

/// Patterns for a path's language family, if it has one.
pub fn rules_for_path(path: &str) -> Option<&'static LanguageRules> {
    let language = detect_language(path)?;
    RULES.iter().find(|rules| rules.language == language)
}

impl LanguageRules {
    pub fn match_function(&self, line: &str) -> Option<Declaration> {
        match_declaration(&self.functions, line)
    }

    pub fn match_class(&self, line: &str) -> Option<Declaration> {
        match_declaration(&self.classes, line)
    }

    /// Symbols imported by this line, empty when it is not an import.
    pub fn match_imports(&self, line: &str) -> Vec<ImportedSymbol> {
        let Some(caps) = self.imports.iter().find_map(|re| re.captures(line)) else {
            return Vec::new();
        };
        let module = caps.name("module").map(|m| m.as_str().to_string());

        let Some(names) = caps.name("names") else {
            return module
                .map(|m| vec![ImportedSymbol { name: m, module: None }])
                .unwrap_or_default();
        };

        names
            .as_str()
            .split(',')
            .filter_map(normalize_import_name)
            .map(|name| {
                if name == "*" {
                    ImportedSymbol {
                        name: module.clone().unwrap_or(name),
                        module: None,
                    }
                } else {
                    ImportedSymbol {
                        name,
                        module: module.clone(),
                    }
                }
            })
            .collect()
    }
}

fn match_declaration(patterns: &[Regex], line: &str) -> Option<Declaration> {
    let caps = patterns.iter().find_map(|re| re.captures(line))?;
    let name = caps.name("name")?.as_str();
    if RESERVED_NAMES.contains(&name) {
        return None;
    }
    let leading = line.split(|c: char| !(c.is_alphanumeric() || c == '_')).find(|w| !w.is_empty());
    if leading.is_some_and(|w| STATEMENT_KEYWORDS.contains(&w)) {
        return None;
    }
    Some(Declaration {
        name: name.to_string(),
        signature: line.trim().trim_end_matches('{').trim_end().to_string(),
    })
}

/// Reduce one comma-separated import item to its symbol name.
///
/// Drops `as` aliases, braces and parentheses, and keeps the last path
/// segment of nested Rust paths (`io::{self` → `self`).
fn normalize_import_name(raw: &str) -> Option<String> {
    let item = raw.split(" as ").next().unwrap_or(raw);
    let item = item.trim_end_matches(';');
    let last = item.rsplit("::").next().unwrap_or(item);
    let name = last
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '{' | '}' | '(' | ')' | '\\'))
        .trim_start_matches("type ");
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(path: &str) -> &'static LanguageRules {
        rules_for_path(path).unwrap()
    }

    fn names(symbols: Vec<ImportedSymbol>) -> Vec<String> {
        symbols.into_iter().map(|s| s.name).collect()
    }

    #[test]
    fn detects_languages_by_extension() {
        assert_eq!(detect_language("src/app.py"), Some(Language::Python));
        assert_eq!(detect_language("src/lib.rs"), Some(Language::Rust));
        assert_eq!(detect_language("web/App.TSX"), Some(Language::JavaScript));
        assert_eq!(detect_language("cmd/main.go"), Some(Language::Go));
        assert_eq!(detect_language("Main.kt"), Some(Language::Jvm));
        assert_eq!(detect_language("Program.cs"), Some(Language::CSharp));
        assert_eq!(detect_language("include/util.h"), Some(Language::C));
        assert_eq!(detect_language("lib/task.rb"), Some(Language::Ruby));
        assert_eq!(detect_language("README.md"), None);
        assert_eq!(detect_language("Makefile"), None);
        assert_eq!(detect_language("some.dir/noext"), None);
    }

    #[test]
    fn python_declarations() {
        let py = rules("a.py");
        let f = py.match_function("    async def fetch(self, url):").unwrap();
        assert_eq!(f.name, "fetch");
        assert_eq!(f.signature, "async def fetch(self, url):");
        assert_eq!(py.match_class("class Handler(Base):").unwrap().name, "Handler");
        assert!(py.match_function("result = define(x)").is_none());
    }

    #[test]
    fn python_imports() {
        let py = rules("a.py");
        let from = py.match_imports("from os.path import join, exists as ex");
        assert_eq!(names(from.clone()), vec!["join", "exists"]);
        assert_eq!(from[0].module.as_deref(), Some("os.path"));
        assert_eq!(names(py.match_imports("import os, sys")), vec!["os", "sys"]);
        assert_eq!(names(py.match_imports("import numpy as np")), vec!["numpy"]);
        assert!(py.match_imports("x = important()").is_empty());
    }

    #[test]
    fn rust_declarations() {
        let rs = rules("a.rs");
        let f = rs.match_function("    pub(crate) async fn load(path: &Path) -> Result<()> {").unwrap();
        assert_eq!(f.name, "load");
        assert_eq!(f.signature, "pub(crate) async fn load(path: &Path) -> Result<()>");
        assert_eq!(rs.match_class("pub enum Mode {").unwrap().name, "Mode");
        assert_eq!(rs.match_class("trait Store: Send {").unwrap().name, "Store");
    }

    #[test]
    fn rust_imports() {
        let rs = rules("a.rs");
        let braced = rs.match_imports("use std::io::{self, Read, Write as W};");
        assert_eq!(names(braced.clone()), vec!["self", "Read", "Write"]);
        assert_eq!(braced[1].module.as_deref(), Some("std::io"));
        let simple = rs.match_imports("use crate::models::Section;");
        assert_eq!(names(simple.clone()), vec!["Section"]);
        assert_eq!(simple[0].module.as_deref(), Some("crate::models"));
        assert_eq!(names(rs.match_imports("use regex;")), vec!["regex"]);
        assert_eq!(names(rs.match_imports("use std::collections::*;")), vec!["std::collections"]);
    }

    #[test]
    fn javascript_declarations_and_imports() {
        let js = rules("a.ts");
        assert_eq!(js.match_function("export async function load(id) {").unwrap().name, "load");
        assert_eq!(js.match_function("const handle = async (req, res) => {").unwrap().name, "handle");
        assert!(js.match_function("const total = a + b;").is_none());
        assert_eq!(js.match_class("export default class Store {").unwrap().name, "Store");
        assert_eq!(
            names(js.match_imports("import React, { useState, useEffect } from 'react';")),
            vec!["React", "useState", "useEffect"]
        );
        assert_eq!(names(js.match_imports("import * as path from 'path';")), vec!["path"]);
        assert_eq!(names(js.match_imports("import './styles.css';")), vec!["./styles.css"]);
        assert_eq!(names(js.match_imports("const fs = require('fs');")), vec!["fs"]);
    }

    #[test]
    fn go_declarations_and_imports() {
        let go = rules("a.go");
        assert_eq!(go.match_function("func (s *Server) Start(ctx context.Context) error {").unwrap().name, "Start");
        assert_eq!(go.match_class("type Config struct {").unwrap().name, "Config");
        assert_eq!(names(go.match_imports("import \"fmt\"")), vec!["fmt"]);
        assert_eq!(names(go.match_imports("\tlog \"github.com/sirupsen/logrus\"")), vec!["github.com/sirupsen/logrus"]);
    }

    #[test]
    fn jvm_declarations_and_imports() {
        let java = rules("A.java");
        let m = java.match_function("    public static List<String> parse(String input) {").unwrap();
        assert_eq!(m.name, "parse");
        assert!(java.match_function("public class Parser {").is_none());
        assert_eq!(java.match_class("public final class Parser {").unwrap().name, "Parser");
        assert_eq!(java.match_function("    suspend fun refresh(id: Int) {").unwrap().name, "refresh");
        let imports = java.match_imports("import java.util.List;");
        assert_eq!(names(imports.clone()), vec!["List"]);
        assert_eq!(imports[0].module.as_deref(), Some("java.util"));
    }

    #[test]
    fn csharp_declarations_and_imports() {
        let cs = rules("A.cs");
        assert_eq!(cs.match_function("    public async Task<int> CountAsync(string key)").unwrap().name, "CountAsync");
        assert_eq!(cs.match_class("public sealed record Order(int Id);").unwrap().name, "Order");
        assert_eq!(names(cs.match_imports("using System.Text;")), vec!["System.Text"]);
    }

    #[test]
    fn c_declarations_and_imports() {
        let c = rules("a.c");
        assert_eq!(c.match_function("static int *parse_line(const char *s) {").unwrap().name, "parse_line");
        assert!(c.match_function("int parse_line(const char *s);").is_none());
        assert!(c.match_function("} else if (x > 0) {").is_none());
        assert!(c.match_function("return compute(a,").is_none());
        assert!(c.match_function("    throw make_error(code,").is_none());
    }

    #[test]
    fn indented_cpp_member_definitions() {
        let cpp = rules("widget.cpp");
        let f = cpp.match_function("    int Widget::size() const {").unwrap();
        assert_eq!(f.name, "Widget::size");
        assert_eq!(f.signature, "int Widget::size() const");
        assert_eq!(cpp.match_function("\tvirtual void draw(Canvas &c) {").unwrap().name, "draw");
        assert!(cpp.match_function("    x = compute(a,").is_none());
        let c = rules("a.c");
        assert_eq!(c.match_class("struct buffer {").unwrap().name, "buffer");
        assert_eq!(names(c.match_imports("#include <stdio.h>")), vec!["stdio.h"]);
    }

    #[test]
    fn ruby_declarations_and_imports() {
        let rb = rules("a.rb");
        assert_eq!(rb.match_function("  def self.valid?(token)").unwrap().name, "valid?");
        assert_eq!(rb.match_class("class Admin::User < Base").unwrap().name, "Admin::User");
        assert_eq!(names(rb.match_imports("require_relative 'helpers'")), vec!["helpers"]);
    }
}
