// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Component source analysis
//!
//! Reads TypeScript component files for the language server:
//!
//! - [`ast`]: top-level classes, their fields and a flat token list
//! - [`locator`]: the `querySelector("...")` literal on a line
//! - [`import`]: the markup file a component imports
//! - [`location`]: cursor and parser coordinates

pub mod ast;
pub mod error;
pub mod import;
pub mod locator;
pub mod location;

pub use ast::{
    ClassDeclaration, PropertyDeclaration, SourceAst, SourceDialect, Token, TokenKind,
    parse_source,
};
pub use error::{SourceError, SourceResult};
pub use import::find_markup_import;
pub use locator::{
    QUERY_SELECTOR_TOKEN, QuoteKind, SelectorContext, is_in_open_selector_literal,
    locate_selector,
};
pub use location::{LineIndex, Position, SourceLocation, SourceRange, is_within, utf16_len};
