// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Compound selectors
//!
//! Matching for the subset of CSS selectors that completion produces and
//! that users commonly type into `querySelector`: an optional type selector
//! followed by `#id`, `.class` and `[attr]` / `[attr=value]` parts.
//! Combinators, pseudo classes and selector lists are rejected.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::SelectorError;
use crate::node::MarkupNode;

/// One part of a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[name]` or `[name=value]`
    Attribute { name: String, value: Option<String> },
}

impl SimpleSelector {
    fn matches(&self, node: &MarkupNode) -> bool {
        match self {
            SimpleSelector::Id(id) => node.id() == Some(id.as_str()),
            SimpleSelector::Class(class) => node.class_list().any(|c| c == class),
            SimpleSelector::Attribute { name, value } => match (node.attribute(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            },
        }
    }
}

/// A parsed compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    parts: Vec<SimpleSelector>,
}

impl Selector {
    /// Parse selector text
    ///
    /// # Examples
    ///
    /// ```
    /// use queryselector_lsp_markup::Selector;
    ///
    /// assert!(Selector::parse("#submit").is_ok());
    /// assert!(Selector::parse(r#"button[data-test="ok"]"#).is_ok());
    /// assert!(Selector::parse("div span").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut chars = text.char_indices().peekable();
        let mut tag = None;
        let mut parts = Vec::new();

        match chars.peek() {
            Some(&(_, '*')) => {
                chars.next();
            }
            Some(&(_, c)) if is_ident_char(c) => {
                tag = Some(read_ident(&mut chars));
            }
            _ => {}
        }

        while let Some((position, c)) = chars.next() {
            match c {
                '#' => {
                    let id = read_ident(&mut chars);
                    if id.is_empty() {
                        return Err(SelectorError::MissingName { position });
                    }
                    parts.push(SimpleSelector::Id(id));
                }
                '.' => {
                    let class = read_ident(&mut chars);
                    if class.is_empty() {
                        return Err(SelectorError::MissingName { position });
                    }
                    parts.push(SimpleSelector::Class(class));
                }
                '[' => parts.push(read_attribute(&mut chars, position)?),
                found => return Err(SelectorError::Unsupported { found, position }),
            }
        }

        Ok(Self { tag, parts })
    }

    /// Whether the node satisfies every part of the selector
    pub fn matches(&self, node: &MarkupNode) -> bool {
        if node.is_document() {
            return false;
        }
        if self
            .tag
            .as_deref()
            .is_some_and(|tag| !tag.eq_ignore_ascii_case(node.tag_name()))
        {
            return false;
        }
        self.parts.iter().all(|part| part.matches(node))
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn parts(&self) -> &[SimpleSelector] {
        &self.parts
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn read_ident(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
}

/// Parse the inside of `[...]`; the opening bracket is already consumed
fn read_attribute(
    chars: &mut Peekable<CharIndices<'_>>,
    position: usize,
) -> Result<SimpleSelector, SelectorError> {
    skip_whitespace(chars);
    let name = read_ident(chars);
    if name.is_empty() {
        return Err(SelectorError::MissingName { position });
    }
    skip_whitespace(chars);

    let value = match chars.next() {
        Some((_, ']')) => return Ok(SimpleSelector::Attribute { name, value: None }),
        Some((_, '=')) => {
            skip_whitespace(chars);
            match chars.peek() {
                Some(&(_, quote)) if quote == '"' || quote == '\'' => {
                    chars.next();
                    let mut value = String::new();
                    loop {
                        match chars.next() {
                            Some((_, c)) if c == quote => break,
                            Some((_, c)) => value.push(c),
                            None => return Err(SelectorError::Unterminated { position }),
                        }
                    }
                    value
                }
                _ => read_ident(chars),
            }
        }
        Some((at, found)) => {
            return Err(SelectorError::Unsupported {
                found,
                position: at,
            });
        }
        None => return Err(SelectorError::Unterminated { position }),
    };

    skip_whitespace(chars);
    match chars.next() {
        Some((_, ']')) => Ok(SimpleSelector::Attribute {
            name,
            value: Some(value),
        }),
        Some((at, found)) => Err(SelectorError::Unsupported {
            found,
            position: at,
        }),
        None => Err(SelectorError::Unterminated { position }),
    }
}
