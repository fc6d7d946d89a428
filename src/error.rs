// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! Error types for docsort

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docsort operations
pub type Result<T> = std::result::Result<T, DocsortError>;

/// docsort error types
///
/// These cover systemic failures only. Per-document trouble (a label that
/// failed to classify, a file that could not be moved) travels through
/// [`crate::classifier::Label`] and [`crate::organizer::PlacementRecord`]
/// instead, so a single bad document can never abort a batch.
#[derive(Error, Debug)]
pub enum DocsortError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Ollama not available: {0}")]
    EngineUnavailable(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Input folder not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("Invalid file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
