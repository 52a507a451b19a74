// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for source analysis

use thiserror::Error;

use crate::location::SourceLocation;

/// Result type alias for source analysis
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while parsing component source
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The grammar could not be loaded into the parser
    #[error("Failed to load TypeScript grammar: {0}")]
    Language(String),

    /// The parser produced no tree
    #[error("Failed to parse source: {0}")]
    ParseFailed(String),

    /// The source contains a syntax error
    #[error("Syntax error at line {}, column {}", location.line, location.column)]
    Syntax { location: SourceLocation },
}
