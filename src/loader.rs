// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 docsort contributors

//! PDF intake: scan a folder, extract text, tolerate bad files

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::ProcessingConfig;
use crate::error::{DocsortError, Result};

/// A document ready for classification.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub file_name: String,
    pub text: String,
    pub pages: usize,
}

/// Load every usable PDF in `dir`, sorted by file name.
///
/// A missing folder is systemic and aborts the run. Everything that goes
/// wrong with an individual file (unreadable, encrypted, outside the size
/// limits, text extraction failure) is logged and skips that file only.
pub fn load_pdfs_from_dir(dir: &Path, limits: &ProcessingConfig) -> Result<Vec<LoadedDocument>> {
    info!("Loading PDFs from: {:?}", dir);

    if !dir.exists() {
        error!("Folder not found: {:?}", dir);
        return Err(DocsortError::InputDirMissing(dir.to_path_buf()));
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_candidate(path))
        .collect();
    candidates.sort();
    info!("Found {} PDF file(s)", candidates.len());

    let mut documents = Vec::new();
    for path in candidates {
        match load_pdf(&path, limits) {
            Ok(Some(doc)) => {
                debug!("Successfully processed: {} ({} page(s))", doc.file_name, doc.pages);
                documents.push(doc);
            }
            Ok(None) => {} // skipped by policy, already logged
            Err(e) => error!("Error processing {:?}: {}", path, e),
        }
    }

    info!("Successfully loaded {} document(s)", documents.len());
    Ok(documents)
}

/// PDF by extension (case-insensitive), not hidden.
fn is_candidate(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Read and extract one PDF. `Ok(None)` means the file was skipped by
/// policy; `Err` means it could not be processed.
fn load_pdf(path: &Path, limits: &ProcessingConfig) -> Result<Option<LoadedDocument>> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| DocsortError::InvalidFileName(path.to_path_buf()))?;

    let size = fs::metadata(path)?.len();
    if size < limits.min_file_size {
        warn!("Skipping {} ({} bytes): below minimum size", file_name, size);
        return Ok(None);
    }
    if size > limits.max_file_size {
        warn!("Skipping {} ({} bytes): above maximum size", file_name, size);
        return Ok(None);
    }

    let bytes = fs::read(path)?;

    let doc = lopdf::Document::load_mem(&bytes)
        .map_err(|e| DocsortError::Pdf(format!("Failed to load PDF: {}", e)))?;
    if limits.skip_encrypted && doc.is_encrypted() {
        warn!("Skipping {}: password-protected", file_name);
        return Ok(None);
    }
    let pages = doc.get_pages().len();

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| DocsortError::Pdf(format!("Text extraction failed: {}", e)))?;

    Ok(Some(LoadedDocument {
        file_name,
        text,
        pages,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn limits() -> ProcessingConfig {
        ProcessingConfig::default()
    }

    /// One-page PDF with real text, built object by object.
    fn write_minimal_pdf(path: &Path) {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal("Hello World")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn valid_pdfs_load_with_text_and_page_count() {
        let dir = TempDir::new().unwrap();
        write_minimal_pdf(&dir.path().join("hello.pdf"));

        let docs = load_pdfs_from_dir(dir.path(), &limits()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].file_name, "hello.pdf");
        assert_eq!(docs[0].pages, 1);
        assert!(docs[0].text.contains("Hello"));
        assert!(docs[0].text.contains("World"));
    }

    #[test]
    fn missing_folder_is_systemic() {
        let dir = TempDir::new().unwrap();
        let err = load_pdfs_from_dir(&dir.path().join("absent"), &limits()).unwrap_err();
        assert!(matches!(err, DocsortError::InputDirMissing(_)));
    }

    #[test]
    fn empty_folder_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let docs = load_pdfs_from_dir(dir.path(), &limits()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn non_pdfs_and_hidden_files_are_not_candidates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), b"text").unwrap();
        fs::write(dir.path().join(".sneaky.pdf"), b"hidden").unwrap();
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        assert!(!is_candidate(&dir.path().join("notes.txt")));
        assert!(!is_candidate(&dir.path().join(".sneaky.pdf")));
        assert!(!is_candidate(&dir.path().join("folder.pdf")));

        let docs = load_pdfs_from_dir(dir.path(), &limits()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn pdf_extension_matches_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SCAN.PDF"), b"x").unwrap();
        assert!(is_candidate(&dir.path().join("SCAN.PDF")));
    }

    #[test]
    fn undersized_files_are_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        // 10 bytes, below the 100-byte minimum
        fs::write(dir.path().join("stub.pdf"), b"too small").unwrap();

        let docs = load_pdfs_from_dir(dir.path(), &limits()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn oversized_files_are_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("big.pdf"), vec![0u8; 600]).unwrap();

        let mut small_limits = limits();
        small_limits.max_file_size = 500;
        let docs = load_pdfs_from_dir(dir.path(), &small_limits).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn unparsable_pdfs_are_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        // Big enough to pass the size gate, but not a PDF at all
        fs::write(dir.path().join("garbage.pdf"), vec![b'x'; 2048]).unwrap();

        let docs = load_pdfs_from_dir(dir.path(), &limits()).unwrap();
        assert!(docs.is_empty());
    }
}
