// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! Configuration management for docsort

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::organizer::category::sanitize_segment;
use crate::organizer::BackupPolicy;
use crate::taxonomy::{default_taxonomy, CategoryGroup};

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Folder scanned for PDF documents
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Root of the organized category tree
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// AI engine configuration
    #[serde(default)]
    pub ai_engine: EngineConfig,

    /// Classification prompt template. Must contain the `{categories}`
    /// and `{document_text}` placeholders.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Document intake limits
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Placement behavior
    #[serde(default)]
    pub organizer: OrganizerConfig,

    /// Category taxonomy offered to the model
    #[serde(default = "default_taxonomy")]
    pub taxonomy: Vec<CategoryGroup>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_engine_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProcessingConfig {
    /// Characters of extracted text handed to the model
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Smallest file considered a real document (bytes)
    #[serde(default = "default_min_file_size")]
    pub min_file_size: u64,
    /// Largest file docsort will read (bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Skip password-protected PDFs
    #[serde(default = "default_true")]
    pub skip_encrypted: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OrganizerConfig {
    #[serde(default)]
    pub backup: BackupPolicy,
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
    #[serde(default = "default_backup_dir_name")]
    pub backup_dir_name: String,
    #[serde(default = "default_journal_path")]
    pub journal_path: String,
}

// Default value functions
fn default_input_dir() -> String { "./documents".to_string() }
fn default_output_dir() -> String { "./classified_documents".to_string() }
fn default_engine_url() -> String { "http://localhost:11434".to_string() }
fn default_model() -> String { "mistral".to_string() }
fn default_timeout() -> u64 { 120 }
fn default_retries() -> u32 { 3 }
fn default_max_chars() -> usize { 1000 }
fn default_min_file_size() -> u64 { 100 }
fn default_max_file_size() -> u64 { 50 * 1024 * 1024 }
fn default_true() -> bool { true }
fn default_fallback_category() -> String { "Uncategorized".to_string() }
fn default_backup_dir_name() -> String { "_backups".to_string() }
fn default_journal_path() -> String { "docsort_history.jsonl".to_string() }

fn default_prompt() -> String {
    "You are an AI assistant trained to classify documents into specific categories.\n\
     The available categories and subcategories are:\n\n\
     {categories}\n\n\
     Given the following document content, classify it into the most appropriate category.\n\
     Use the exact category name from the list above.\n\
     If it fits into both a main category and subcategory, use the format: \
     \"MainCategory > Subcategory\"\n\
     Provide just the category without any explanation.\n\n\
     Document content:\n\
     {document_text}"
        .to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            ai_engine: EngineConfig::default(),
            prompt: default_prompt(),
            processing: ProcessingConfig::default(),
            organizer: OrganizerConfig::default(),
            taxonomy: default_taxonomy(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            retries: default_retries(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            min_file_size: default_min_file_size(),
            max_file_size: default_max_file_size(),
            skip_encrypted: true,
        }
    }
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            backup: BackupPolicy::default(),
            fallback_category: default_fallback_category(),
            backup_dir_name: default_backup_dir_name(),
            journal_path: default_journal_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::DocsortError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject configurations that cannot produce a working run
    pub fn validate(&self) -> crate::Result<()> {
        if self.ai_engine.url.trim().is_empty() {
            return Err(crate::DocsortError::Config(
                "ai_engine.url must not be empty".to_string(),
            ));
        }
        if self.ai_engine.model.trim().is_empty() {
            return Err(crate::DocsortError::Config(
                "ai_engine.model must not be empty".to_string(),
            ));
        }
        if !self.prompt.contains("{categories}") || !self.prompt.contains("{document_text}") {
            return Err(crate::DocsortError::Config(
                "prompt must contain the {categories} and {document_text} placeholders"
                    .to_string(),
            ));
        }
        if self.processing.min_file_size > self.processing.max_file_size {
            return Err(crate::DocsortError::Config(format!(
                "processing.min_file_size ({}) exceeds max_file_size ({})",
                self.processing.min_file_size, self.processing.max_file_size
            )));
        }
        if sanitize_segment(&self.organizer.fallback_category).is_empty() {
            return Err(crate::DocsortError::Config(
                "organizer.fallback_category sanitizes to an empty folder name".to_string(),
            ));
        }
        if self.taxonomy.is_empty() {
            return Err(crate::DocsortError::Config(
                "taxonomy must contain at least one category".to_string(),
            ));
        }
        if let Some(group) = self.taxonomy.iter().find(|g| g.name.trim().is_empty()) {
            return Err(crate::DocsortError::Config(format!(
                "taxonomy group with empty name (subcategories: {:?})",
                group.subcategories
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_validate() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.ai_engine.model, "mistral");
        assert_eq!(config.processing.max_chars, 1000);
        assert_eq!(config.organizer.backup, BackupPolicy::BestEffort);
        assert_eq!(config.taxonomy.len(), 10);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.output_dir, "./classified_documents");
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"input_dir": "/srv/inbox", "organizer": {"backup": "off"}}"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.input_dir, "/srv/inbox");
        assert_eq!(config.organizer.backup, BackupPolicy::Off);
        assert_eq!(config.organizer.fallback_category, "Uncategorized");
        assert_eq!(config.ai_engine.url, "http://localhost:11434");
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{broken").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.ai_engine.model = "llama3".to_string();
        config.organizer.backup = BackupPolicy::Required;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.ai_engine.model, "llama3");
        assert_eq!(loaded.organizer.backup, BackupPolicy::Required);
    }

    #[test]
    fn validate_rejects_prompts_missing_placeholders() {
        let mut config = AppConfig::default();
        config.prompt = "Classify this: {document_text}".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unusable_fallback() {
        let mut config = AppConfig::default();
        config.organizer.fallback_category = "...".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_size_limits() {
        let mut config = AppConfig::default();
        config.processing.min_file_size = 1024;
        config.processing.max_file_size = 512;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_taxonomy() {
        let mut config = AppConfig::default();
        config.taxonomy.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_prompt_carries_both_placeholders() {
        let prompt = default_prompt();
        assert!(prompt.contains("{categories}"));
        assert!(prompt.contains("{document_text}"));
        assert!(prompt.contains("MainCategory > Subcategory"));
    }
}
