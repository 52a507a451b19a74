// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion module
//!
//! Selector completion inside `querySelector("...")` literals.
//!
//! ## Flow
//!
//! ```text
//! 1. LSP Backend receives completion request
//!    ↓
//! 2. Cursor must sit inside an open selector literal
//!    ↓
//! 3. Load the markup file the source imports
//!    ↓
//! 4. Locate the literal on the cursor line
//!    ↓
//! 5. CandidateIndex::build() collects ids and data/test attributes
//!    ↓
//! 6. CompletionRenderer turns them into completion items
//! ```

pub mod error;
pub mod render;

use std::path::Path;

use queryselector_lsp_markup::CandidateIndex;
use queryselector_lsp_source::{LineIndex, is_in_open_selector_literal, locate_selector};
use tower_lsp::lsp_types::{CompletionList, Position};
use tracing::debug;

use crate::completion::error::CompletionError;
use crate::completion::render::CompletionRenderer;
use crate::config::EngineConfig;
use crate::markup_link::load_linked_markup;

/// Completion engine
///
/// Every call re-reads the linked markup file; nothing is cached between
/// requests.
pub struct CompletionEngine {
    config: EngineConfig,
}

impl CompletionEngine {
    /// Create a new completion engine
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Perform completion at the given position
    ///
    /// # Returns
    ///
    /// - `Ok(Some(list))` - Cursor is in a selector literal of a component with markup
    /// - `Ok(None)` - No completion (not in a literal, or no markup import)
    /// - `Err(CompletionError)` - The markup file could not be loaded
    pub fn complete(
        &self,
        source_text: &str,
        source_path: &Path,
        position: Position,
    ) -> Result<Option<CompletionList>, CompletionError> {
        let lines = LineIndex::new(source_text);
        let line = lines
            .line(position.line as usize)
            .ok_or(CompletionError::InvalidPosition(position))?;

        let prefix = utf16_prefix(line, position.character);
        if !is_in_open_selector_literal(prefix) {
            return Ok(None);
        }

        let Some(root) = load_linked_markup(source_text, source_path)? else {
            debug!("No markup import in {}", source_path.display());
            return Ok(None);
        };

        let Some(selector) = locate_selector(line) else {
            return Ok(None);
        };
        debug!(
            "Completing selector '{}' (quote {:?})",
            selector.text_within_quotes, selector.quote_type
        );

        let index = CandidateIndex::build(&root, self.config.attribute_prefixes.as_slice());
        let items = CompletionRenderer::render(&index, &selector, position.line);

        Ok(Some(CompletionList {
            is_incomplete: false,
            items,
        }))
    }
}

/// Text of `line` before a UTF-16 column, clamped to the line end
fn utf16_prefix(line: &str, character: u32) -> &str {
    let mut units = 0u32;
    for (byte, c) in line.char_indices() {
        if units >= character {
            return &line[..byte];
        }
        units += c.len_utf16() as u32;
    }
    line
}
