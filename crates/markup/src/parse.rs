// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Markup parsing
//!
//! Builds a [`MarkupNode`] tree from HTML text using tree-sitter-html.
//! The grammar recovers from malformed input; elements found inside `ERROR`
//! nodes are kept so half-written templates still produce candidates.

use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::entities::decode_entities;
use crate::error::{MarkupError, MarkupResult};
use crate::node::MarkupNode;

/// Parse markup text into a tree rooted at a synthetic `#document` node
///
/// # Examples
///
/// ```
/// use queryselector_lsp_markup::parse_markup;
///
/// let root = parse_markup(r#"<div id="app"><button data-test="ok"></button></div>"#).unwrap();
/// let button = root.query_selector(r#"[data-test="ok"]"#).unwrap();
/// assert_eq!(button.tag_name(), "button");
/// ```
pub fn parse_markup(text: &str) -> MarkupResult<MarkupNode> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_html::LANGUAGE.into())
        .map_err(|e| MarkupError::Language(e.to_string()))?;

    let tree = parser
        .parse(text, None)
        .ok_or_else(|| MarkupError::ParseFailed("tree-sitter returned no tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        debug!("Markup parsed with recovered errors");
    }

    let mut document = MarkupNode::document(Vec::new());
    collect_elements(root, text.as_bytes(), &mut document);
    Ok(document)
}

/// Append every element child of `node` to `parent`, skipping text and comments
fn collect_elements(node: Node<'_>, source: &[u8], parent: &mut MarkupNode) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "element" | "script_element" | "style_element" => {
                if let Some(element) = build_element(child, source) {
                    parent.push_child(element);
                }
            }
            // An unclosed tag at the end of input surfaces as a bare tag in ERROR
            "start_tag" | "self_closing_tag" if node.is_error() => {
                if let Some(element) = element_from_tag(child, source) {
                    parent.push_child(element);
                }
            }
            "ERROR" => collect_elements(child, source, parent),
            _ => {}
        }
    }
}

fn build_element(node: Node<'_>, source: &[u8]) -> Option<MarkupNode> {
    let mut cursor = node.walk();
    let tag = node
        .children(&mut cursor)
        .find(|c| matches!(c.kind(), "start_tag" | "self_closing_tag"))?;

    let mut element = element_from_tag(tag, source)?;
    collect_elements(node, source, &mut element);
    Some(element)
}

fn element_from_tag(tag: Node<'_>, source: &[u8]) -> Option<MarkupNode> {
    let mut cursor = tag.walk();
    let mut element = None;

    for child in tag.children(&mut cursor) {
        match child.kind() {
            "tag_name" => {
                let name = child.utf8_text(source).ok()?;
                element = Some(MarkupNode::new(name));
            }
            "attribute" => {
                if let (Some(element), Some((name, value))) =
                    (element.as_mut(), read_attribute(child, source))
                {
                    element.set_attribute(name, decode_entities(value));
                }
            }
            _ => {}
        }
    }

    element
}

/// Read an attribute's name and raw unquoted value; a bare attribute has an empty value
fn read_attribute<'a>(node: Node<'_>, source: &'a [u8]) -> Option<(&'a str, &'a str)> {
    let mut cursor = node.walk();
    let mut name = None;
    let mut value = "";

    for child in node.children(&mut cursor) {
        match child.kind() {
            "attribute_name" => name = child.utf8_text(source).ok(),
            "attribute_value" => value = child.utf8_text(source).ok()?,
            "quoted_attribute_value" => {
                let mut inner = child.walk();
                value = child
                    .children(&mut inner)
                    .find(|c| c.kind() == "attribute_value")
                    .and_then(|c| c.utf8_text(source).ok())
                    .unwrap_or("");
            }
            _ => {}
        }
    }

    name.map(|name| (name, value))
}
