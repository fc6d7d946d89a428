// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! Document classification against the taxonomy

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::error::Result;
use crate::loader::LoadedDocument;
use crate::ollama::OllamaClient;
use crate::taxonomy;

/// Outcome of classifying one document: a raw category label from the
/// model, or a typed failure the rest of the pipeline cannot ignore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Label {
    /// Raw model output, e.g. `"Healthcare > Lab Results"`. Not checked
    /// against the taxonomy; a label the taxonomy never mentions still
    /// files cleanly as a novel folder.
    Category(String),
    /// The model call failed; carries the reason for the report.
    Failed(String),
}

impl Label {
    pub fn is_failed(&self) -> bool {
        matches!(self, Label::Failed(_))
    }
}

/// One classified document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub file_name: String,
    pub label: Label,
}

/// Seam between the batch loop and whatever produces labels.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Return a raw category label for the given document text.
    async fn classify(&self, text: &str) -> Result<String>;
}

/// Classifier backed by an Ollama text model.
pub struct OllamaClassifier {
    client: OllamaClient,
    model: String,
    retries: u32,
    prompt_template: String,
    categories_block: String,
}

impl OllamaClassifier {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: OllamaClient::new(&config.ai_engine.url, config.ai_engine.timeout_secs),
            model: config.ai_engine.model.clone(),
            retries: config.ai_engine.retries,
            prompt_template: config.prompt.clone(),
            categories_block: taxonomy::format_for_prompt(&config.taxonomy),
        }
    }

    fn build_prompt(&self, excerpt: &str) -> String {
        self.prompt_template
            .replace("{categories}", &self.categories_block)
            .replace("{document_text}", excerpt)
    }
}

#[async_trait]
impl Classifier for OllamaClassifier {
    async fn classify(&self, text: &str) -> Result<String> {
        let prompt = self.build_prompt(text);
        let response = self
            .client
            .generate_with_retry(&self.model, &prompt, self.retries)
            .await?;
        Ok(clean_label(&response))
    }
}

/// Classify every loaded document. Per-document failures become
/// [`Label::Failed`]; the loop always returns one result per input, in
/// input order.
pub async fn classify_documents(
    classifier: &dyn Classifier,
    documents: &[LoadedDocument],
    max_chars: usize,
) -> Vec<ClassificationResult> {
    info!("Starting classification of {} document(s)", documents.len());
    let mut results = Vec::with_capacity(documents.len());

    for doc in documents {
        debug!("Classifying document: {}", doc.file_name);
        let label = match classifier.classify(excerpt(&doc.text, max_chars)).await {
            Ok(raw) => {
                debug!("Classified {} as: {}", doc.file_name, raw);
                Label::Category(raw)
            }
            Err(e) => {
                error!("Error classifying {}: {}", doc.file_name, e);
                Label::Failed(e.to_string())
            }
        };
        results.push(ClassificationResult {
            file_name: doc.file_name.clone(),
            label,
        });
    }

    info!("Completed classification of {} document(s)", documents.len());
    results
}

/// Strip chat wrapping from a model reply: the label is the first
/// non-empty line, minus surrounding quotes and whitespace.
fn clean_label(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .to_string()
}

/// First `max_chars` characters of `text`, cut on a char boundary.
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
