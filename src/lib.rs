// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! docsort: Local LLM PDF Classifier & Organizer
//!
//! Classifies PDF documents against a category taxonomy using a local
//! Ollama model, then files each document into a matching directory tree
//! with pre-move backups, collision-safe names, and a per-document
//! placement record.

pub mod classifier;
pub mod config;
pub mod error;
pub mod history;
pub mod loader;
pub mod ollama;
pub mod organizer;
pub mod report;
pub mod taxonomy;

pub use config::AppConfig;
pub use error::{DocsortError, Result};
