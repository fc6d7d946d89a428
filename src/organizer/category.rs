// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! Category label parsing and folder-name sanitization

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Substituted when a label (or a configured fallback) yields nothing usable.
pub const DEFAULT_FALLBACK: &str = "Uncategorized";

/// Characters that cannot appear in a folder name on common filesystems.
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Turn an arbitrary text fragment into a filesystem-safe path segment.
///
/// Illegal and control characters become `_`; leading and trailing
/// whitespace and dots are trimmed so a segment can never read as `.`,
/// `..`, or a hidden directory. Total and idempotent. The result may be
/// empty; callers substitute a fallback segment in that case.
pub fn sanitize_segment(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    replaced
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// An ordered list of folder names derived from a classification label,
/// outermost first.
///
/// Every path holds at least one segment and every segment is non-empty
/// and filesystem-safe, so joining the segments under an output root is
/// always a valid relative directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    /// Parse a raw classifier label into a category path.
    ///
    /// Levels are separated by `>` in any spacing variant (`"Main > Sub"`,
    /// `"Main>Sub"`, `"A >> B"`). Segments left empty by doubled or
    /// dangling separators are dropped; segments that sanitize to nothing
    /// are replaced with `fallback`. A label without a separator names a
    /// single folder and the document is filed directly under it. A label
    /// with nothing usable at all collapses to the fallback alone.
    pub fn resolve(label: &str, fallback: &str) -> Self {
        let fallback_clean = sanitize_segment(fallback);
        let fallback = if fallback_clean.is_empty() {
            DEFAULT_FALLBACK
        } else {
            fallback_clean.as_str()
        };

        let mut segments: Vec<String> = label
            .split('>')
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                let clean = sanitize_segment(raw);
                if clean.is_empty() {
                    fallback.to_string()
                } else {
                    clean
                }
            })
            .collect();

        if segments.is_empty() {
            segments.push(fallback.to_string());
        }

        CategoryPath(segments)
    }

    /// Folder names in order, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The relative directory this path names under an output root.
    pub fn as_rel_path(&self) -> PathBuf {
        self.0.iter().collect()
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}
