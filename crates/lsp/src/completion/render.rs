// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion rendering
//!
//! Turns markup candidates into LSP completion items placed over the
//! selector literal being typed.
//!
//! Ids replace only the typed text. Attribute selectors replace the typed
//! text plus the closing quote, append a back-tick, and swap a `"` or `'`
//! opening quote for a back-tick in a second edit. The literal becomes a
//! template string, so the inserted `"value"` needs no escaping.

use queryselector_lsp_markup::{AttributeCandidate, CandidateIndex};
use queryselector_lsp_source::{QuoteKind, SelectorContext};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Position, Range, TextEdit,
};

/// Completion renderer
///
/// Converts selector candidates to LSP CompletionItem representations.
pub struct CompletionRenderer;

impl CompletionRenderer {
    /// Render ids first, then attribute selectors, each in document order
    pub fn render(
        index: &CandidateIndex,
        selector: &SelectorContext,
        line: u32,
    ) -> Vec<CompletionItem> {
        let mut items = Vec::with_capacity(index.ids.len() + index.attributes.len());

        for id in &index.ids {
            items.push(Self::id_item(id, selector, line));
        }

        for candidate in &index.attributes {
            items.push(Self::attribute_item(candidate, selector, line));
        }

        items
    }

    /// Render a `#id` completion item
    ///
    /// Sort and filter on `#id` once the user has typed the `#`, on the bare
    /// id otherwise.
    pub fn id_item(id: &str, selector: &SelectorContext, line: u32) -> CompletionItem {
        let label = format!("#{}", id);
        let key = if selector.text_within_quotes.starts_with('#') {
            label.clone()
        } else {
            id.to_string()
        };

        CompletionItem {
            label: label.clone(),
            kind: Some(CompletionItemKind::VALUE),
            detail: Some("Element id".to_string()),
            sort_text: Some(key.clone()),
            filter_text: Some(key),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(
                Self::id_range(selector, line),
                label,
            ))),
            ..Default::default()
        }
    }

    /// Render a `[name="value"]` completion item
    pub fn attribute_item(
        candidate: &AttributeCandidate,
        selector: &SelectorContext,
        line: u32,
    ) -> CompletionItem {
        let label = candidate.selector();
        let key = if selector.text_within_quotes.starts_with('[') {
            label.clone()
        } else {
            format!("{}=\"{}\"", candidate.name, candidate.value)
        };

        CompletionItem {
            label: label.clone(),
            kind: Some(CompletionItemKind::VALUE),
            detail: Some("Attribute selector".to_string()),
            sort_text: Some(key.clone()),
            filter_text: Some(key),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(
                Self::attribute_range(selector, line),
                format!("{}`", label),
            ))),
            additional_text_edits: Self::quote_edit(selector, line).map(|edit| vec![edit]),
            ..Default::default()
        }
    }

    /// Typed text, excluding any closing quote
    pub fn id_range(selector: &SelectorContext, line: u32) -> Range {
        Range::new(
            Position::new(line, selector.text_start()),
            Position::new(line, selector.text_end()),
        )
    }

    /// Typed text and the closing quote, when there is one
    pub fn attribute_range(selector: &SelectorContext, line: u32) -> Range {
        let end = selector
            .end_quote_index
            .map(|index| index + 1)
            .unwrap_or_else(|| selector.text_end());
        Range::new(
            Position::new(line, selector.text_start()),
            Position::new(line, end),
        )
    }

    /// Replace a `"` or `'` opening quote with a back-tick
    pub fn quote_edit(selector: &SelectorContext, line: u32) -> Option<TextEdit> {
        match selector.quote_type {
            Some(QuoteKind::Double | QuoteKind::Single) => Some(TextEdit::new(
                Range::new(
                    Position::new(line, selector.start_quote_index),
                    Position::new(line, selector.start_quote_index + 1),
                ),
                "`".to_string(),
            )),
            Some(QuoteKind::Backtick) | None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queryselector_lsp_source::locate_selector;

    fn edit_of(item: &CompletionItem) -> &TextEdit {
        match item.text_edit.as_ref() {
            Some(CompletionTextEdit::Edit(edit)) => edit,
            other => panic!("Expected plain text edit, found {:?}", other),
        }
    }

    #[test]
    fn test_id_item_with_hash_typed() {
        let selector = locate_selector(r##"    this.el = document.querySelector("#sub"##).unwrap();
        let item = CompletionRenderer::id_item("sub-button", &selector, 7);

        assert_eq!(item.label, "#sub-button");
        assert_eq!(item.kind, Some(CompletionItemKind::VALUE));
        assert_eq!(item.sort_text.as_deref(), Some("#sub-button"));
        assert_eq!(item.filter_text.as_deref(), Some("#sub-button"));

        let edit = edit_of(&item);
        assert_eq!(edit.new_text, "#sub-button");
        assert_eq!(edit.range, Range::new(Position::new(7, 38), Position::new(7, 42)));
        assert!(item.additional_text_edits.is_none());
    }

    #[test]
    fn test_id_item_without_hash_uses_bare_key() {
        let selector = locate_selector(r#"document.querySelector("su")"#).unwrap();
        let item = CompletionRenderer::id_item("submit", &selector, 0);
        assert_eq!(item.sort_text.as_deref(), Some("submit"));
        // Closing quote stays in place
        assert_eq!(
            edit_of(&item).range,
            Range::new(Position::new(0, 24), Position::new(0, 26))
        );
    }

    #[test]
    fn test_attribute_item_swaps_quote() {
        let selector = locate_selector(r#"document.querySelector('[da')"#).unwrap();
        let candidate = AttributeCandidate::new("data-testid", "ok");
        let item = CompletionRenderer::attribute_item(&candidate, &selector, 2);

        assert_eq!(item.label, r#"[data-testid="ok"]"#);
        assert_eq!(item.sort_text.as_deref(), Some(r#"[data-testid="ok"]"#));

        let edit = edit_of(&item);
        assert_eq!(edit.new_text, "[data-testid=\"ok\"]`");
        // Through the closing quote
        assert_eq!(edit.range, Range::new(Position::new(2, 24), Position::new(2, 28)));

        let extra = item.additional_text_edits.as_ref().unwrap();
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].new_text, "`");
        assert_eq!(extra[0].range, Range::new(Position::new(2, 23), Position::new(2, 24)));
    }

    #[test]
    fn test_attribute_item_in_template_literal() {
        let selector = locate_selector("document.querySelector(`").unwrap();
        let candidate = AttributeCandidate::new("test-id", "x");
        let item = CompletionRenderer::attribute_item(&candidate, &selector, 0);

        assert_eq!(item.sort_text.as_deref(), Some(r#"test-id="x""#));
        assert!(item.additional_text_edits.is_none());
        assert_eq!(
            edit_of(&item).range,
            Range::new(Position::new(0, 24), Position::new(0, 24))
        );
    }

    #[test]
    fn test_render_orders_ids_before_attributes() {
        let selector = locate_selector("document.querySelector(\"").unwrap();
        let index = CandidateIndex {
            ids: vec!["a".to_string(), "b".to_string()],
            attributes: vec![AttributeCandidate::new("data-x", "1")],
        };
        let labels: Vec<String> = CompletionRenderer::render(&index, &selector, 0)
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, vec!["#a", "#b", r#"[data-x="1"]"#]);
    }
}
