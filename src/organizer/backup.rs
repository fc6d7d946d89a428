// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! Pre-move snapshots of original documents

use chrono::Local;
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::collision::resolve_destination;
use crate::error::{DocsortError, Result};

/// Copies originals into timestamped folders under a reserved subtree of
/// the output root before anything moves them.
///
/// Snapshots are write-once: nothing in docsort reads them back, and a
/// new snapshot never overwrites an earlier one, so same-second runs and
/// repeated file names still leave every copy intact.
pub struct BackupManager {
    backup_root: PathBuf,
}

impl BackupManager {
    pub fn new(backup_root: PathBuf) -> Self {
        Self { backup_root }
    }

    /// Copy `file` into a `<backup_root>/<YYYYMMDD_HHMMSS>/` folder and
    /// return the snapshot path. The source is never mutated. The copy
    /// carries the original's permission bits; its modification time is
    /// carried over where the platform allows.
    pub fn backup(&self, file: &Path) -> Result<PathBuf> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DocsortError::InvalidFileName(file.to_path_buf()))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let snapshot_dir = self.backup_root.join(stamp);
        fs::create_dir_all(&snapshot_dir)?;

        // Two same-second backups of equally named files must not clobber
        // each other.
        let dest = resolve_destination(&snapshot_dir, file_name);

        let metadata = fs::metadata(file)?;
        fs::copy(file, &dest)?;

        let mtime = FileTime::from_last_modification_time(&metadata);
        if let Err(e) = filetime::set_file_mtime(&dest, mtime) {
            debug!("Could not preserve mtime on {:?}: {}", dest, e);
        }

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn backup_copies_without_touching_the_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("invoice.pdf");
        fs::write(&source, b"original bytes").unwrap();

        let manager = BackupManager::new(dir.path().join("_backups"));
        let snapshot = manager.backup(&source).unwrap();

        assert!(snapshot.exists());
        assert_eq!(fs::read(&snapshot).unwrap(), b"original bytes");
        assert_eq!(fs::read(&source).unwrap(), b"original bytes");
    }

    #[test]
    fn snapshots_land_in_a_timestamped_folder() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.pdf");
        fs::write(&source, b"x").unwrap();

        let backup_root = dir.path().join("_backups");
        let manager = BackupManager::new(backup_root.clone());
        let snapshot = manager.backup(&source).unwrap();

        let stamp_dir = snapshot.parent().unwrap();
        assert_eq!(stamp_dir.parent().unwrap(), backup_root);

        let stamp = stamp_dir.file_name().unwrap().to_str().unwrap();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
        assert!(stamp[..8].chars().all(|c| c.is_ascii_digit()));
        assert!(stamp[9..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn repeated_backups_never_clobber_each_other() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("report.pdf");
        fs::write(&source, b"v1").unwrap();

        let manager = BackupManager::new(dir.path().join("_backups"));
        let first = manager.backup(&source).unwrap();

        fs::write(&source, b"v2").unwrap();
        let second = manager.backup(&source).unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"v1");
        assert_eq!(fs::read(&second).unwrap(), b"v2");
    }

    #[test]
    fn backup_preserves_modification_time() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("old.pdf");
        fs::write(&source, b"x").unwrap();

        let past = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&source, past).unwrap();

        let manager = BackupManager::new(dir.path().join("_backups"));
        let snapshot = manager.backup(&source).unwrap();

        let copied = fs::metadata(&snapshot).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&copied), past);
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = TempDir::new().unwrap();
        let manager = BackupManager::new(dir.path().join("_backups"));

        let result = manager.backup(&dir.path().join("gone.pdf"));
        assert!(result.is_err());
    }
}
