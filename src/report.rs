// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! Batch outcome reporting

use serde::Serialize;
use std::fmt;

use crate::organizer::{PlacementRecord, PlacementStatus};

/// Counts by terminal status for one organize pass. The four buckets
/// always partition the batch, so `total` equals their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub classification_failed: usize,
    pub missing: usize,
    pub move_failed: usize,
}

impl BatchReport {
    pub fn from_records(records: &[PlacementRecord]) -> Self {
        let mut report = Self::default();
        for record in records {
            report.total += 1;
            match record.status {
                PlacementStatus::Success => report.succeeded += 1,
                PlacementStatus::ClassificationFailed => report.classification_failed += 1,
                PlacementStatus::FileNotFound => report.missing += 1,
                PlacementStatus::MoveFailed => report.move_failed += 1,
            }
        }
        report
    }

    /// Documents that stayed in the input folder for any reason.
    pub fn failures(&self) -> usize {
        self.classification_failed + self.missing + self.move_failed
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Organized {} document(s):", self.total)?;
        writeln!(f, "  Moved:                 {}", self.succeeded)?;
        writeln!(f, "  Classification failed: {}", self.classification_failed)?;
        writeln!(f, "  Missing source:        {}", self.missing)?;
        write!(f, "  Move failed:           {}", self.move_failed)
    }
}

/// Print one block per document, the way the CLI shows an organize pass.
pub fn print_records(records: &[PlacementRecord]) {
    for record in records {
        match record.status {
            PlacementStatus::Success => {
                let category = record
                    .category_path
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_default();
                println!("{} -> {}", record.file_name, category);
                if let Some(path) = &record.final_path {
                    println!("  Moved to: {}", path.display());
                }
            }
            status => {
                println!("{} -> {}", record.file_name, status);
                if let Some(error) = &record.error {
                    println!("  Reason: {}", error);
                }
            }
        }
        println!("---");
    }
}
