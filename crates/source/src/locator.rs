// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Selector literal locator
//!
//! Finds the string argument of a `querySelector(...)` call on a single line
//! of source text. The literal is usually still being typed, so this is a
//! small scanner over raw text rather than a parse: it tolerates a missing
//! closing quote, a missing closing parenthesis and anything after them.

use std::sync::LazyLock;

use regex::Regex;

use crate::location::utf16_len;

/// The call name that marks a selector literal
pub const QUERY_SELECTOR_TOKEN: &str = "querySelector";

/// Cursor is inside an open literal: `querySelector(  "abc` with no closing quote or `)`
static OPEN_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"querySelector\s*\(\s*(?:"[^)"]*|'[^)']*|`[^)`]*)$"#).expect("valid regex")
});

/// Quote character delimiting a selector literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteKind {
    Double,
    Single,
    Backtick,
}

impl QuoteKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(QuoteKind::Double),
            '\'' => Some(QuoteKind::Single),
            '`' => Some(QuoteKind::Backtick),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            QuoteKind::Double => '"',
            QuoteKind::Single => '\'',
            QuoteKind::Backtick => '`',
        }
    }
}

/// The selector literal found on a line
///
/// Indices are UTF-16 columns within the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorContext {
    /// Text between the quotes, or up to end of line when unterminated
    pub text_within_quotes: String,
    /// `None` when no quote follows the call name
    pub quote_type: Option<QuoteKind>,
    /// Column of the opening quote
    pub start_quote_index: u32,
    /// Column of the closing quote; `None` while the literal is still being typed
    pub end_quote_index: Option<u32>,
}

impl SelectorContext {
    pub fn is_terminated(&self) -> bool {
        self.end_quote_index.is_some()
    }

    /// First column of the typed selector text
    pub fn text_start(&self) -> u32 {
        self.start_quote_index + 1
    }

    /// Column just past the typed selector text (the closing quote, if any)
    pub fn text_end(&self) -> u32 {
        self.end_quote_index
            .unwrap_or_else(|| self.text_start() + utf16_len(&self.text_within_quotes))
    }
}

enum ScanState {
    SeekingQuote,
    InsideQuote {
        quote: QuoteKind,
        column: u32,
        byte: usize,
    },
}

/// Locate the first `querySelector` literal on a line
///
/// # Examples
///
/// ```
/// use queryselector_lsp_source::{QuoteKind, locate_selector};
///
/// let ctx = locate_selector(r##"this.el = document.querySelector("#sub"##).unwrap();
/// assert_eq!(ctx.text_within_quotes, "#sub");
/// assert_eq!(ctx.quote_type, Some(QuoteKind::Double));
/// assert_eq!(ctx.end_quote_index, None);
/// ```
pub fn locate_selector(line: &str) -> Option<SelectorContext> {
    let token_start = line.find(QUERY_SELECTOR_TOKEN)?;
    let mut column = utf16_len(&line[..token_start]);
    let mut state = ScanState::SeekingQuote;

    for (offset, c) in line[token_start..].char_indices() {
        let byte = token_start + offset;
        match state {
            ScanState::SeekingQuote => {
                if let Some(quote) = QuoteKind::from_char(c) {
                    state = ScanState::InsideQuote { quote, column, byte };
                }
            }
            ScanState::InsideQuote {
                quote,
                column: start_column,
                byte: start_byte,
            } if c == quote.as_char() => {
                return Some(SelectorContext {
                    text_within_quotes: line[start_byte + 1..byte].to_string(),
                    quote_type: Some(quote),
                    start_quote_index: start_column,
                    end_quote_index: Some(column),
                });
            }
            ScanState::InsideQuote { .. } => {}
        }
        column += c.len_utf16() as u32;
    }

    match state {
        ScanState::InsideQuote {
            quote,
            column,
            byte,
        } => Some(SelectorContext {
            text_within_quotes: line[byte + 1..].to_string(),
            quote_type: Some(quote),
            start_quote_index: column,
            end_quote_index: None,
        }),
        // No quote at all: take whatever follows the call's opening parenthesis
        ScanState::SeekingQuote => {
            let after_token = token_start + QUERY_SELECTOR_TOKEN.len();
            let text = line[after_token..].chars().skip(1).collect();
            Some(SelectorContext {
                text_within_quotes: text,
                quote_type: None,
                start_quote_index: utf16_len(&line[..after_token]),
                end_quote_index: None,
            })
        }
    }
}

/// Whether the text before the cursor ends inside an open selector literal
///
/// # Examples
///
/// ```
/// use queryselector_lsp_source::is_in_open_selector_literal;
///
/// assert!(is_in_open_selector_literal("document.querySelector('#a"));
/// assert!(!is_in_open_selector_literal("document.querySelector('#a')"));
/// ```
pub fn is_in_open_selector_literal(line_prefix: &str) -> bool {
    OPEN_LITERAL.is_match(line_prefix)
}
