//! Permissive affected-file extraction.
//!
//! Three independent regex passes over the whole diff text, so files show
//! up even when their diff body is missing (pure renames, mode changes,
//! binary files). Results are unioned in pass order, first-seen order
//! within a pass, with `/dev/null` filtered out.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::models::diff::DEV_NULL;

static GIT_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"diff --git a/(.*) b/").unwrap());
static NEW_SIDE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+\+\+ b/(.*)").unwrap());
static OLD_SIDE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--- a/(.*)").unwrap());

/// Extract every file path the diff mentions, de-duplicated in first-seen order.
pub fn affected_files(diff: &str) -> Vec<String> {
    let mut files: IndexSet<String> = IndexSet::new();

    for re in [&*GIT_HEADER_RE, &*NEW_SIDE_RE, &*OLD_SIDE_RE] {
        for caps in re.captures_iter(diff) {
            let path = caps[1].trim_end_matches('\r');
            if path.is_empty() || path == DEV_NULL {
                continue;
            }
            files.insert(path.to_string());
        }
    }

    files.into_iter().collect()
}
