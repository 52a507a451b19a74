// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for markup operations

use thiserror::Error;

/// Result type alias for markup operations
pub type MarkupResult<T> = Result<T, MarkupError>;

/// Errors that can occur while parsing a markup document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// The HTML grammar could not be loaded into the parser
    #[error("Failed to load HTML grammar: {0}")]
    Language(String),

    /// The parser produced no tree
    #[error("Failed to parse markup: {0}")]
    ParseFailed(String),
}

/// Errors that can occur while parsing selector text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Nothing but whitespace
    #[error("Empty selector")]
    Empty,

    /// A character outside the supported compound-selector subset
    #[error("Unsupported selector syntax '{found}' at {position}")]
    Unsupported { found: char, position: usize },

    /// `#`, `.` or `[` without a following name
    #[error("Missing name at {position}")]
    MissingName { position: usize },

    /// An attribute selector or quoted value that never closes
    #[error("Unterminated attribute selector starting at {position}")]
    Unterminated { position: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_error_display() {
        let err = SelectorError::Unsupported {
            found: '>',
            position: 4,
        };
        assert_eq!(err.to_string(), "Unsupported selector syntax '>' at 4");
        assert_eq!(SelectorError::Empty.to_string(), "Empty selector");
    }
}
