// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion error types
//!
//! This module defines error types for the completion system.

use tower_lsp::lsp_types::Position;

use crate::markup_link::LinkError;

/// Errors that can occur during completion
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Cursor line is outside the document
    #[error("Invalid position: {0:?}")]
    InvalidPosition(Position),

    /// Document URI has no file system path to resolve imports against
    #[error("Document is not a local file: {0}")]
    NotAFile(String),

    /// The linked markup file could not be loaded
    #[error("Markup error: {0}")]
    Link(#[from] LinkError),
}

impl CompletionError {
    /// Check if this error should result in an empty completion list
    /// (vs. being reported to the client)
    pub fn should_return_empty(&self) -> bool {
        matches!(
            self,
            CompletionError::InvalidPosition(_) | CompletionError::NotAFile(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::InvalidPosition(Position::new(9, 0));
        assert!(err.to_string().contains("Invalid position"));

        let err = CompletionError::Link(LinkError::FileNotFound {
            path: PathBuf::from("/app/a.html"),
        });
        assert_eq!(err.to_string(), "Markup error: Html file /app/a.html was not found.");
    }

    #[test]
    fn test_should_return_empty() {
        assert!(CompletionError::InvalidPosition(Position::new(0, 0)).should_return_empty());
        assert!(CompletionError::NotAFile("untitled:1".to_string()).should_return_empty());

        // A missing markup file is worth telling the client about
        let err = CompletionError::Link(LinkError::FileNotFound {
            path: PathBuf::from("a.html"),
        });
        assert!(!err.should_return_empty());
    }
}
