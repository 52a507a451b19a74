// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Multi-pass tree traversal
//!
//! A [`Traverser`] holds an ordered, statically typed list of [`Check`]s and
//! evaluates all of them in a single pre-order walk. The result is a nested
//! tuple with one `Vec` per registered check, in registration order:
//!
//! ```
//! use queryselector_lsp_markup::{MarkupNode, Traverser, parse_markup};
//!
//! let root = parse_markup(r#"<div id="a"><span id="b" data-x="1"></span></div>"#).unwrap();
//!
//! let traverser = Traverser::new()
//!     .with_check(|node: &MarkupNode| node.id().map(str::to_string))
//!     .with_check(|node: &MarkupNode| Some(node.tag_name().to_string()));
//!
//! let (((), ids), tags) = traverser.traverse(&root);
//! assert_eq!(ids, vec!["a", "b"]);
//! assert_eq!(tags, vec!["#document", "div", "span"]);
//! ```

use crate::node::MarkupNode;

/// A per-node check producing at most one result
pub trait Check {
    type Output;

    fn evaluate(&self, node: &MarkupNode) -> Option<Self::Output>;
}

impl<F, T> Check for F
where
    F: Fn(&MarkupNode) -> Option<T>,
{
    type Output = T;

    fn evaluate(&self, node: &MarkupNode) -> Option<T> {
        self(node)
    }
}

/// A heterogeneous list of checks, built as `((((), A), B), C)`
pub trait CheckSet {
    /// One `Vec` per check, nested the same way as the checks
    type Results;

    fn empty_results(&self) -> Self::Results;

    fn visit(&self, node: &MarkupNode, results: &mut Self::Results);
}

impl CheckSet for () {
    type Results = ();

    fn empty_results(&self) -> Self::Results {}

    fn visit(&self, _node: &MarkupNode, _results: &mut Self::Results) {}
}

impl<Rest, C> CheckSet for (Rest, C)
where
    Rest: CheckSet,
    C: Check,
{
    type Results = (Rest::Results, Vec<C::Output>);

    fn empty_results(&self) -> Self::Results {
        (self.0.empty_results(), Vec::new())
    }

    fn visit(&self, node: &MarkupNode, results: &mut Self::Results) {
        self.0.visit(node, &mut results.0);
        if let Some(result) = self.1.evaluate(node) {
            results.1.push(result);
        }
    }
}

/// Walks a markup tree once and collects results for every registered check
#[derive(Debug, Clone, Default)]
pub struct Traverser<S = ()> {
    checks: S,
}

impl Traverser<()> {
    /// Create a traverser with no checks
    pub fn new() -> Self {
        Self { checks: () }
    }
}

impl<S: CheckSet> Traverser<S> {
    /// Return a new traverser with `check` appended.
    ///
    /// The receiver is consumed; clone it first to branch a pipeline.
    pub fn with_check<C: Check>(self, check: C) -> Traverser<(S, C)> {
        Traverser {
            checks: (self.checks, check),
        }
    }

    /// Evaluate every check on `root` and all its descendants in pre-order
    pub fn traverse(&self, root: &MarkupNode) -> S::Results {
        let mut results = self.checks.empty_results();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            self.checks.visit(node, &mut results);
            stack.extend(node.children().iter().rev());
        }

        results
    }
}
