// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # queryselector-lsp - Markup Layer
//!
//! This crate turns the companion HTML document of a component into an owned
//! element tree and extracts what the completion layer needs from it.
//!
//! ## Overview
//!
//! - [`parse_markup`]: tree-sitter-html text to [`MarkupNode`] tree
//! - [`Selector`]: compound selector matching behind [`MarkupNode::query_selector`]
//! - [`Traverser`]: typed multi-check pre-order walk
//! - [`CandidateIndex`]: de-duplicated ids and `data*`/`test*` attributes
//!
//! Trees are built per request and dropped afterwards; nothing is cached.

pub mod candidates;
pub mod entities;
pub mod error;
pub mod node;
pub mod parse;
pub mod selector;
pub mod traverser;

pub use candidates::{AttributeCandidate, CandidateIndex, DEFAULT_ATTRIBUTE_PREFIXES};
pub use entities::decode_entities;
pub use error::{MarkupError, MarkupResult, SelectorError};
pub use node::{DOCUMENT_TAG, Descendants, MarkupNode};
pub use parse::parse_markup;
pub use selector::{Selector, SimpleSelector};
pub use traverser::{Check, CheckSet, Traverser};
