//! Hygiene — enforces coding standards at test time
//!
//! These tests scan the crate's production sources for panicking calls and
//! silently discarded errors. Each has a budget. If you must add one, fix an
//! existing one first; the budget never grows.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Panics — these crash the process.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;

// Silent loss — discards errors without inspecting.
const MAX_SILENT_DISCARD: usize = 0;
// Env lookups with defaults, the optional `.env` file and header decoding.
const MAX_DOT_OK: usize = 4;

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

/// Lines containing `pattern`, per file. Lines after a `#[cfg(test)]` marker
/// are ignored.
fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .take_while(|line| !line.contains("#[cfg(test)]"))
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn total(hits: &[(String, usize)]) -> usize {
    hits.iter().map(|(_, c)| c).sum()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn assert_budget(pattern: &str, max: usize) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found under src/");
    let hits = count_in_source(&files, pattern);
    let count = total(&hits);
    assert!(count <= max, "{pattern} budget exceeded: found {count}, max {max}.\n{}", format_hits(&hits));
}

#[test]
fn unwrap_budget() {
    assert_budget(".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    assert_budget(".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    assert_budget("panic!(", MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    assert_budget("unreachable!(", MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    assert_budget("todo!(", MAX_TODO);
}

#[test]
fn silent_discard_budget() {
    assert_budget("let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    assert_budget(".ok()", MAX_DOT_OK);
}
