//! Collision-free file names for new board files.
//!
//! # Invariants
//! - Output depends only on `base` and which candidate files exist.
//! - Returned names never contain path separators.
//! - Stems are at most `MAX_FILE_STEM_BYTES` long, leaving room for a
//!   `_N.xml` suffix under the usual 255-byte file name limit.

use super::filesystem::FileSystem;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Extension of saved board documents.
pub const BOARD_FILE_EXTENSION: &str = "xml";
/// Stem used when a board name sanitizes to nothing.
pub const DEFAULT_FILE_STEM: &str = "board";
/// Longest stem `sanitize_file_stem` returns, in bytes.
pub const MAX_FILE_STEM_BYTES: usize = 200;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static UNSAFE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w-]+").expect("valid unsafe chars regex"));
static UNDERSCORE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_{2,}").expect("valid underscore regex"));

/// Lowercases `base` and reduces it to Unicode word characters, `_` and `-`.
///
/// The result is capped at `MAX_FILE_STEM_BYTES`, cut on a char boundary.
pub fn sanitize_file_stem(base: &str) -> String {
    let lowered = base.trim().to_lowercase();
    let spaced = WHITESPACE_RE.replace_all(&lowered, "_");
    let safe = UNSAFE_CHARS_RE.replace_all(&spaced, "");
    let collapsed = UNDERSCORE_RUN_RE.replace_all(&safe, "_");
    let stem = truncate_to_bytes(&collapsed, MAX_FILE_STEM_BYTES).trim_matches('_');
    if stem.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        stem.to_string()
    }
}

fn truncate_to_bytes(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Returns the first free `<stem>.xml`, `<stem>_1.xml`, ... inside `dir`.
pub fn new_filename_in<F: FileSystem + ?Sized>(fs: &F, dir: &Path, base: &str) -> String {
    let stem = sanitize_file_stem(base);
    let first = format!("{stem}.{BOARD_FILE_EXTENSION}");
    if !fs.exists(&dir.join(&first)) {
        return first;
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{stem}_{suffix}.{BOARD_FILE_EXTENSION}");
        if !fs.exists(&dir.join(&candidate)) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{new_filename_in, sanitize_file_stem, MAX_FILE_STEM_BYTES};
    use crate::storage::filesystem::{FileSystem, LocalFileSystem};

    #[test]
    fn sanitize_lowercases_and_replaces_whitespace() {
        assert_eq!(sanitize_file_stem("My Board"), "my_board");
        assert_eq!(sanitize_file_stem("  Sprint\t 12  "), "sprint_12");
    }

    #[test]
    fn sanitize_strips_path_and_shell_characters() {
        assert_eq!(sanitize_file_stem("../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_file_stem("a/b\\c:d*e?"), "abcde");
        assert_eq!(sanitize_file_stem("to-do _ list"), "to-do_list");
    }

    #[test]
    fn sanitize_falls_back_for_empty_result() {
        assert_eq!(sanitize_file_stem(""), "board");
        assert_eq!(sanitize_file_stem("???"), "board");
    }

    #[test]
    fn sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize_file_stem("Über Plan"), "über_plan");
    }

    #[test]
    fn sanitize_caps_long_names() {
        let stem = sanitize_file_stem(&"a".repeat(300));
        assert_eq!(stem, "a".repeat(MAX_FILE_STEM_BYTES));

        // Two-byte chars: the cap lands on a char boundary.
        let stem = sanitize_file_stem(&format!("x{}", "é".repeat(300)));
        assert!(stem.len() <= MAX_FILE_STEM_BYTES);
        assert_eq!(stem.len(), MAX_FILE_STEM_BYTES - 1);
        assert!(stem.starts_with('x'));

        let stem = sanitize_file_stem(&format!("{} tail", "b".repeat(MAX_FILE_STEM_BYTES - 1)));
        assert_eq!(stem, "b".repeat(MAX_FILE_STEM_BYTES - 1));
    }

    #[test]
    fn numbering_skips_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFileSystem;

        assert_eq!(new_filename_in(&fs, dir.path(), "My Board"), "my_board.xml");
        fs.write(&dir.path().join("my_board.xml"), "").unwrap();
        assert_eq!(new_filename_in(&fs, dir.path(), "My Board"), "my_board_1.xml");
        fs.write(&dir.path().join("my_board_1.xml"), "").unwrap();
        assert_eq!(new_filename_in(&fs, dir.path(), "my board"), "my_board_2.xml");
    }
}
