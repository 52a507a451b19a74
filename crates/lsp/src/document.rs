// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Management
//!
//! Holds the editor text of open component sources. Only text is stored:
//! parse results are never cached, every request parses afresh.
//!
//! ## Example
//!
//! ```rust,ignore
//! use queryselector_lsp_lsp::DocumentStore;
//! use tower_lsp::lsp_types::Url;
//!
//! let store = DocumentStore::new();
//! let uri = Url::parse("file:///app/login.ts").unwrap();
//!
//! store.open_document(uri.clone(), content, 1, "typescript".to_string()).await;
//!
//! if let Some(doc) = store.get_document(&uri).await {
//!     println!("Content: {}", doc.get_content());
//! }
//! ```

use queryselector_lsp_source::SourceDialect;
use ropey::Rope;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{
    Position, TextDocumentContentChangeEvent, Url, VersionedTextDocumentIdentifier,
};

/// Language ids the server answers completion and code actions for
pub const SUPPORTED_LANGUAGES: &[&str] = &["typescript", "typescriptreact", "javascript"];

/// Document metadata
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Document URI
    pub uri: Url,

    /// Language identifier (e.g., "typescript", "javascript")
    pub language_id: String,

    /// Document version
    /// Incremented on each change
    pub version: i32,

    /// Line count
    pub line_count: usize,
}

impl DocumentMetadata {
    /// Create new document metadata
    pub fn new(uri: Url, language_id: String, version: i32, line_count: usize) -> Self {
        Self {
            uri,
            language_id,
            version,
            line_count,
        }
    }
}

/// A document managed by the LSP server
#[derive(Debug, Clone)]
pub struct Document {
    /// Document metadata
    metadata: DocumentMetadata,

    /// Document content as a rope for efficient editing
    content: Rope,
}

impl Document {
    /// Create a new document
    pub fn new(uri: Url, content: String, version: i32, language_id: String) -> Self {
        let rope = Rope::from_str(&content);
        let line_count = rope.len_lines();

        let metadata = DocumentMetadata::new(uri, language_id, version, line_count);

        Self {
            metadata,
            content: rope,
        }
    }

    /// Get the document language ID
    pub fn language_id(&self) -> &str {
        &self.metadata.language_id
    }

    /// Whether completion and quick fixes apply to this document
    pub fn is_supported(&self) -> bool {
        SUPPORTED_LANGUAGES.contains(&self.language_id())
    }

    /// Grammar for parsing this document, from its language id or else its extension
    pub fn dialect(&self) -> SourceDialect {
        SourceDialect::from_language_id(self.language_id()).unwrap_or_else(|| {
            self.file_path()
                .map(|path| SourceDialect::from_path(&path))
                .unwrap_or_default()
        })
    }

    /// File system path used to resolve relative markup imports
    pub fn file_path(&self) -> Option<PathBuf> {
        self.metadata.uri.to_file_path().ok()
    }

    /// Get the document version
    pub fn version(&self) -> i32 {
        self.metadata.version
    }

    /// Get the line count
    pub fn line_count(&self) -> usize {
        self.metadata.line_count
    }

    /// Get the full document content as a string
    pub fn get_content(&self) -> String {
        self.content.to_string()
    }

    /// Character offset of an LSP position (UTF-16 column)
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        if line >= self.line_count() {
            return None;
        }

        let line_start = self.content.line_to_char(line);
        let line_end = if line + 1 < self.line_count() {
            self.content.line_to_char(line + 1)
        } else {
            self.content.len_chars()
        };

        let line_start_cu = self.content.char_to_utf16_cu(line_start);
        let line_end_cu = self.content.char_to_utf16_cu(line_end);
        let target_cu = line_start_cu + position.character as usize;
        if target_cu > line_end_cu {
            return None;
        }

        Some(self.content.utf16_cu_to_char(target_cu))
    }

    /// Apply content changes to the document
    ///
    /// The batch applies as a whole: if any change has an invalid range, the
    /// content and version are left untouched.
    pub fn apply_changes(
        &mut self,
        changes: &[TextDocumentContentChangeEvent],
        new_version: i32,
    ) -> Result<(), DocumentError> {
        let mut staged = self.clone();

        for change in changes {
            match &change.range {
                Some(range) => {
                    // Incremental change
                    let invalid = || DocumentError::InvalidRange {
                        start: (range.start.line as usize, range.start.character as usize),
                        end: (range.end.line as usize, range.end.character as usize),
                    };

                    let start_char = staged.offset(range.start).ok_or_else(invalid)?;
                    let end_char = staged.offset(range.end).ok_or_else(invalid)?;
                    if start_char > end_char {
                        return Err(invalid());
                    }

                    staged.content.remove(start_char..end_char);
                    staged.content.insert(start_char, &change.text);
                }
                None => {
                    // Full document change
                    staged.content = Rope::from_str(&change.text);
                }
            }
            staged.metadata.line_count = staged.content.len_lines();
        }

        staged.metadata.version = new_version;
        *self = staged;

        Ok(())
    }
}

/// Document store for managing multiple documents
///
/// Thread-safe store for all open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    /// Map of document URI to document
    documents: Arc<RwLock<HashMap<Url, Document>>>,
}

impl DocumentStore {
    /// Create a new document store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document, replacing any previous one under the same URI
    pub async fn open_document(&self, uri: Url, content: String, version: i32, language_id: String) {
        let mut docs = self.documents.write().await;
        let document = Document::new(uri.clone(), content, version, language_id);
        docs.insert(uri, document);
    }

    /// Close a document
    ///
    /// Returns true if the document was closed, false if it didn't exist
    pub async fn close_document(&self, uri: &Url) -> bool {
        let mut docs = self.documents.write().await;
        docs.remove(uri).is_some()
    }

    /// Update a document
    pub async fn update_document(
        &self,
        identifier: &VersionedTextDocumentIdentifier,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<(), DocumentError> {
        let mut docs = self.documents.write().await;

        let document = docs
            .get_mut(&identifier.uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(identifier.uri.clone()))?;

        document.apply_changes(changes, identifier.version)
    }

    /// Get a document by URI
    pub async fn get_document(&self, uri: &Url) -> Option<Document> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }
}

/// Document-related errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(Url),

    /// Invalid range for text operation
    #[error("Invalid range: start={start:?}, end={end:?}")]
    InvalidRange {
        start: (usize, usize),
        end: (usize, usize),
    },
}
