// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Markup nodes
//!
//! An owned element tree built from a parsed markup document. Only element
//! nodes are kept; text and comments never make it into the tree.

use crate::selector::Selector;

/// Tag name of the synthetic root that holds the top-level elements.
pub const DOCUMENT_TAG: &str = "#document";

/// A single element of a markup document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupNode {
    tag_name: String,
    /// Attribute pairs in document order, first occurrence of a name wins
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
}

impl MarkupNode {
    /// Create an element with no attributes and no children
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create the synthetic document root
    pub fn document(children: Vec<MarkupNode>) -> Self {
        Self {
            tag_name: DOCUMENT_TAG.to_string(),
            attributes: Vec::new(),
            children,
        }
    }

    /// Add an attribute (builder style)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Add a child element (builder style)
    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute unless the name is already present
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if self.attribute(&name).is_none() {
            self.attributes.push((name, value.into()));
        }
    }

    pub(crate) fn push_child(&mut self, child: MarkupNode) {
        self.children.push(child);
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Whether this is the synthetic root rather than a real element
    pub fn is_document(&self) -> bool {
        self.tag_name == DOCUMENT_TAG
    }

    /// The `id` attribute, if present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Look up an attribute value by name (names are case-insensitive)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Whitespace-separated entries of the `class` attribute
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or("").split_whitespace()
    }

    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    /// Iterate over all descendants in pre-order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Return the first descendant matching a compound selector.
    ///
    /// Unsupported or malformed selectors never match anything.
    pub fn query_selector(&self, selector: &str) -> Option<&MarkupNode> {
        match Selector::parse(selector) {
            Ok(selector) => self.select_first(&selector),
            Err(e) => {
                tracing::debug!("Selector {:?} rejected: {}", selector, e);
                None
            }
        }
    }

    /// Return the first descendant matching an already parsed selector
    pub fn select_first(&self, selector: &Selector) -> Option<&MarkupNode> {
        self.descendants().find(|node| selector.matches(node))
    }
}

/// Pre-order descendant iterator
pub struct Descendants<'a> {
    stack: Vec<&'a MarkupNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a MarkupNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MarkupNode {
        MarkupNode::document(vec![
            MarkupNode::new("div")
                .with_attribute("id", "outer")
                .with_child(MarkupNode::new("span").with_attribute("class", "a b"))
                .with_child(MarkupNode::new("button").with_attribute("data-role", "ok")),
            MarkupNode::new("p"),
        ])
    }

    #[test]
    fn test_descendants_pre_order() {
        let root = sample();
        let tags: Vec<&str> = root.descendants().map(|n| n.tag_name()).collect();
        assert_eq!(tags, vec!["div", "span", "button", "p"]);
    }

    #[test]
    fn test_first_attribute_wins() {
        let node = MarkupNode::new("div")
            .with_attribute("id", "first")
            .with_attribute("ID", "second");
        assert_eq!(node.id(), Some("first"));
        assert_eq!(node.attributes().count(), 1);
    }

    #[test]
    fn test_empty_id_is_absent() {
        let node = MarkupNode::new("div").with_attribute("id", "");
        assert_eq!(node.id(), None);
    }

    #[test]
    fn test_class_list() {
        let root = sample();
        let span = root.query_selector("span").unwrap();
        assert_eq!(span.class_list().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_query_selector_excludes_self() {
        let node = MarkupNode::new("div").with_attribute("id", "x");
        assert!(node.query_selector("#x").is_none());
    }

    #[test]
    fn test_query_selector_rejects_unsupported() {
        let root = sample();
        assert!(root.query_selector("div > span").is_none());
    }
}
