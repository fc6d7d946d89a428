// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! Document placement: resolve, back up, move, record
//!
//! The organizer takes classification results and files each document
//! into the category tree under the output root. Every document ends in
//! exactly one terminal state, captured as a [`PlacementRecord`]; no
//! failure of one document ever stops the rest of the batch.

pub mod backup;
pub mod category;
pub mod collision;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::classifier::{ClassificationResult, Label};
use crate::config::OrganizerConfig;
use crate::error::Result;
use crate::history::{History, HistoryEntry};

use backup::BackupManager;
use collision::resolve_destination;

pub use category::CategoryPath;

/// Backup behavior for an organize pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupPolicy {
    /// No snapshots.
    Off,
    /// Snapshot first; if the snapshot fails, warn and move anyway.
    #[default]
    BestEffort,
    /// Snapshot first; if the snapshot fails, refuse to move the document.
    Required,
}

/// Terminal outcome for one document. First outcome wins; there are no
/// retries within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStatus {
    Success,
    ClassificationFailed,
    FileNotFound,
    MoveFailed,
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PlacementStatus::Success => "success",
            PlacementStatus::ClassificationFailed => "classification failed",
            PlacementStatus::FileNotFound => "file not found",
            PlacementStatus::MoveFailed => "move failed",
        };
        write!(f, "{}", text)
    }
}

/// What happened to one document during an organize pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub file_name: String,
    pub status: PlacementStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_path: Option<CategoryPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlacementRecord {
    fn success(file_name: String, category_path: CategoryPath, final_path: PathBuf) -> Self {
        Self {
            file_name,
            status: PlacementStatus::Success,
            category_path: Some(category_path),
            final_path: Some(final_path),
            error: None,
        }
    }

    fn classification_failed(file_name: String, reason: &str) -> Self {
        Self {
            file_name,
            status: PlacementStatus::ClassificationFailed,
            category_path: None,
            final_path: None,
            error: Some(reason.to_string()),
        }
    }

    fn not_found(file_name: String, source: &Path) -> Self {
        Self {
            file_name,
            status: PlacementStatus::FileNotFound,
            category_path: None,
            final_path: None,
            error: Some(format!("Source file not found: {}", source.display())),
        }
    }

    fn move_failed(file_name: String, category_path: CategoryPath, error: String) -> Self {
        Self {
            file_name,
            status: PlacementStatus::MoveFailed,
            category_path: Some(category_path),
            final_path: None,
            error: Some(error),
        }
    }
}

/// Moves classified documents into the category tree under the output
/// root. Owns every side effect of placement: directory creation,
/// backups, the move itself, and the journal.
pub struct Organizer {
    output_root: PathBuf,
    backup_policy: BackupPolicy,
    backups: BackupManager,
    fallback_category: String,
    journal: Option<History>,
}

impl Organizer {
    /// Set up the engine, creating the output root eagerly. Failure here
    /// is systemic and aborts the whole pass before any document is
    /// touched.
    pub fn new(
        output_root: PathBuf,
        options: &OrganizerConfig,
        journal: Option<History>,
    ) -> Result<Self> {
        let output_root = if output_root.is_absolute() {
            output_root
        } else {
            std::env::current_dir()?.join(output_root)
        };
        fs::create_dir_all(&output_root)?;
        debug!("Output root ready: {:?}", output_root);

        let backups = BackupManager::new(output_root.join(&options.backup_dir_name));

        Ok(Self {
            output_root,
            backup_policy: options.backup,
            backups,
            fallback_category: options.fallback_category.clone(),
            journal,
        })
    }

    /// Resolve, back up, and move a single document, producing its
    /// terminal record. Never returns `Err`: every per-document failure
    /// is folded into the record so the batch can continue.
    pub fn place(&self, source: &Path, label: &Label) -> PlacementRecord {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());

        let raw_label = match label {
            Label::Failed(reason) => {
                debug!("Leaving {} in place: classification failed", file_name);
                return PlacementRecord::classification_failed(file_name, reason);
            }
            Label::Category(raw) => raw,
        };

        if !source.exists() {
            warn!("Source vanished before organizing: {:?}", source);
            return PlacementRecord::not_found(file_name, source);
        }

        let category = CategoryPath::resolve(raw_label, &self.fallback_category);
        let category_dir = self.output_root.join(category.as_rel_path());

        if let Err(e) = fs::create_dir_all(&category_dir) {
            return PlacementRecord::move_failed(
                file_name,
                category,
                format!("Failed to create {}: {}", category_dir.display(), e),
            );
        }

        let dest = resolve_destination(&category_dir, &file_name);

        match self.backup_policy {
            BackupPolicy::Off => {}
            BackupPolicy::BestEffort => {
                if let Err(e) = self.backups.backup(source) {
                    warn!("Backup failed for {} (moving anyway): {}", file_name, e);
                }
            }
            BackupPolicy::Required => {
                if let Err(e) = self.backups.backup(source) {
                    return PlacementRecord::move_failed(
                        file_name,
                        category,
                        format!("Mandatory backup failed: {}", e),
                    );
                }
            }
        }

        if let Err(e) = fs::rename(source, &dest) {
            // rename moves the file whole or not at all; the source is
            // still in place after a failure.
            return PlacementRecord::move_failed(file_name, category, e.to_string());
        }

        info!("Moved {} -> {:?}", file_name, dest);

        if let Some(journal) = &self.journal {
            // rename does not change content, so the digest of the moved
            // file is the original's. Runs without a journal never read
            // the document at all.
            let file_hash = match content_hash(&dest) {
                Ok(hash) => hash,
                Err(e) => {
                    debug!("Could not hash {}: {}", file_name, e);
                    String::new()
                }
            };
            let entry = HistoryEntry::new(source, &dest, raw_label, &category, file_hash);
            if let Err(e) = journal.append(&entry) {
                warn!("Could not journal placement of {}: {}", file_name, e);
            }
        }

        PlacementRecord::success(file_name, category, dest)
    }

    /// Place every classified document from `input_dir`, one record per
    /// input, in input order.
    pub fn organize(
        &self,
        input_dir: &Path,
        results: &[ClassificationResult],
    ) -> Vec<PlacementRecord> {
        info!(
            "Organizing {} document(s) into {:?}",
            results.len(),
            self.output_root
        );
        results
            .iter()
            .map(|result| self.place(&input_dir.join(&result.file_name), &result.label))
            .collect()
    }
}

/// Content hash recorded in the journal (blake3, hex).
pub fn content_hash(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    Ok(blake3::hash(&data).to_hex().to_string())
}
