// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! Collision-free destination names

use std::path::{Path, PathBuf};

/// Pick a destination for `file_name` inside `dir` that does not collide
/// with an existing entry.
///
/// The first candidate is `dir/file_name`; while that name is taken,
/// `stem_1.ext`, `stem_2.ext`, ... are probed in increasing order and the
/// first free one wins. Existing files are never touched. The batch runs
/// single-threaded, so the name picked here is still free at move time.
pub fn resolve_destination(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = split_name(file_name);
    let mut counter: u32 = 1;
    loop {
        let numbered = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };
        let path = dir.join(&numbered);
        if !path.exists() {
            return path;
        }
        counter += 1;
    }
}

/// Split a file name into stem and extension. Dotfiles and names without
/// a dot count as all stem, matching `Path::file_stem`.
fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (file_name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn free_name_is_used_as_is() {
        let dir = TempDir::new().unwrap();
        let dest = resolve_destination(dir.path(), "report.pdf");
        assert_eq!(dest, dir.path().join("report.pdf"));
    }

    #[test]
    fn probes_numeric_suffixes_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("report.pdf"), b"first").unwrap();

        let dest = resolve_destination(dir.path(), "report.pdf");
        assert_eq!(dest, dir.path().join("report_1.pdf"));

        fs::write(&dest, b"second").unwrap();
        let dest = resolve_destination(dir.path(), "report.pdf");
        assert_eq!(dest, dir.path().join("report_2.pdf"));
    }

    #[test]
    fn skips_over_existing_numbered_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("scan.pdf"), b"x").unwrap();
        fs::write(dir.path().join("scan_1.pdf"), b"x").unwrap();
        fs::write(dir.path().join("scan_2.pdf"), b"x").unwrap();

        let dest = resolve_destination(dir.path(), "scan.pdf");
        assert_eq!(dest, dir.path().join("scan_3.pdf"));
    }

    #[test]
    fn names_without_extension_get_plain_suffix() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes"), b"x").unwrap();

        let dest = resolve_destination(dir.path(), "notes");
        assert_eq!(dest, dir.path().join("notes_1"));
    }

    #[test]
    fn dotfiles_keep_their_leading_dot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".config"), b"x").unwrap();

        let dest = resolve_destination(dir.path(), ".config");
        assert_eq!(dest, dir.path().join(".config_1"));
    }

    #[test]
    fn split_name_handles_edge_cases() {
        assert_eq!(split_name("report.pdf"), ("report", "pdf"));
        assert_eq!(split_name("archive.tar.gz"), ("archive.tar", "gz"));
        assert_eq!(split_name("noext"), ("noext", ""));
        assert_eq!(split_name(".hidden"), (".hidden", ""));
    }
}
