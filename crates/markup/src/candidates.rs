// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Selector candidates
//!
//! Collects the two candidate families offered for completion, element ids
//! and `data*`/`test*` attributes, in one traversal of a markup tree.

use std::collections::HashSet;

use crate::node::MarkupNode;
use crate::traverser::Traverser;

/// Attribute name prefixes collected when no others are configured
pub const DEFAULT_ATTRIBUTE_PREFIXES: &[&str] = &["data", "test"];

/// An attribute name/value pair usable as `[name="value"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeCandidate {
    pub name: String,
    pub value: String,
}

impl AttributeCandidate {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Render as an attribute selector, e.g. `[data-test="ok"]`
    pub fn selector(&self) -> String {
        format!("[{}=\"{}\"]", self.name, self.value)
    }
}

/// De-duplicated candidates, each kept at its first occurrence in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateIndex {
    pub ids: Vec<String>,
    pub attributes: Vec<AttributeCandidate>,
}

impl CandidateIndex {
    /// Build the index for `root` using the given attribute name prefixes
    ///
    /// # Examples
    ///
    /// ```
    /// use queryselector_lsp_markup::{CandidateIndex, parse_markup};
    ///
    /// let root = parse_markup(r#"<div id="a" data-role="x"></div><p id="a"></p>"#).unwrap();
    /// let index = CandidateIndex::build(&root, &["data"]);
    /// assert_eq!(index.ids, vec!["a"]);
    /// assert_eq!(index.attributes[0].selector(), r#"[data-role="x"]"#);
    /// ```
    pub fn build<P: AsRef<str>>(root: &MarkupNode, prefixes: &[P]) -> Self {
        let traverser = Traverser::new()
            .with_check(|node: &MarkupNode| node.id().map(str::to_string))
            .with_check(|node: &MarkupNode| {
                let matching: Vec<AttributeCandidate> = node
                    .attributes()
                    .filter(|(name, _)| prefixes.iter().any(|p| name.starts_with(p.as_ref())))
                    .map(|(name, value)| AttributeCandidate::new(name, value))
                    .collect();
                (!matching.is_empty()).then_some(matching)
            });

        let (((), ids), attribute_lists) = traverser.traverse(root);

        let mut seen_ids = HashSet::new();
        let ids = ids
            .into_iter()
            .filter(|id| seen_ids.insert(id.clone()))
            .collect();

        // Keyed by name + value, matching how duplicates are recognized
        let mut seen_attributes = HashSet::new();
        let attributes = attribute_lists
            .into_iter()
            .flatten()
            .filter(|a| seen_attributes.insert(format!("{}{}", a.name, a.value)))
            .collect();

        Self { ids, attributes }
    }

    /// Build the index with [`DEFAULT_ATTRIBUTE_PREFIXES`]
    pub fn build_default(root: &MarkupNode) -> Self {
        Self::build(root, DEFAULT_ATTRIBUTE_PREFIXES)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.attributes.is_empty()
    }
}
