// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Typed property synthesis
//!
//! Backs the "add private property" command. Given an assignment such as
//!
//! ```text
//! this.submit = document.querySelector("#submit");
//! ```
//!
//! where `submit` is not declared, the element matched by `#submit` in the
//! linked markup decides the field type, and the field is inserted into the
//! enclosing class:
//!
//! ```text
//! private submit : HTMLButtonElement;
//! ```

use std::path::Path;

use queryselector_lsp_source::{
    ClassDeclaration, LineIndex, Position as SourcePosition, SourceDialect, SourceError,
    locate_selector, parse_source,
};
use tower_lsp::lsp_types::{Position, Range, TextEdit};
use tracing::debug;

use crate::config::EngineConfig;
use crate::markup_link::{LinkError, load_linked_markup};

const ELEMENT_TYPE_PREFIX: &str = "HTML";
const ELEMENT_TYPE_SUFFIX: &str = "Element";

/// Failures of the property command, each shown to the user as is
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("Could not parse document")]
    Parse(#[source] SourceError),

    #[error("Not within a top level class declaration")]
    NotInClass,

    #[error("No html import found")]
    NoMarkupImport,

    #[error(transparent)]
    Link(#[from] LinkError),

    /// `line` is 1-based
    #[error("No query selector found on line {line}")]
    NoSelector { line: u32 },

    #[error("Nothing found for query selector {selector}")]
    NoMatch { selector: String },

    #[error("Token not found")]
    TokenNotFound,
}

/// Nominal DOM type for a tag: `button` → `HTMLButtonElement`
///
/// This is a naming convention, not a lookup, so custom tags still get a
/// name.
pub fn element_type_name(tag_name: &str) -> String {
    let mut chars = tag_name.chars();
    let stem: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    };
    format!("{}{}{}", ELEMENT_TYPE_PREFIX, stem, ELEMENT_TYPE_SUFFIX)
}

/// A field declaration ready to insert at column 0 of `line`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInsertion {
    /// 0-based editor line
    pub line: u32,
    /// Indent of the inserted declaration
    pub column: u32,
    /// Full text including indent and trailing newline
    pub text: String,
}

impl FieldInsertion {
    pub fn new(line: u32, column: u32, identifier: &str, type_name: &str) -> Self {
        let text = format!(
            "{}private {} : {};\n",
            " ".repeat(column as usize),
            identifier,
            type_name
        );
        Self { line, column, text }
    }

    /// Plain insertion at the start of the line
    pub fn to_text_edit(&self) -> TextEdit {
        let at = Position::new(self.line, 0);
        TextEdit::new(Range::new(at, at), self.text.clone())
    }
}

/// Decide where the new field goes inside `class`
///
/// With existing fields, the new one goes on the line above the first of
/// them, at the same indent. Otherwise it goes on the line after the class
/// keyword, `property_indent` columns further in.
pub fn plan_insertion(
    class: &ClassDeclaration,
    identifier: &str,
    type_name: &str,
    property_indent: u32,
) -> FieldInsertion {
    match class.properties.first() {
        Some(first) => {
            let start = first.range.start;
            // Parser line minus one is the field's own editor line; inserting there pushes it down
            FieldInsertion::new(start.line.saturating_sub(1), start.column, identifier, type_name)
        }
        None => {
            let start = class.range.start;
            // A 1-based line number read as 0-based lands on the following line
            FieldInsertion::new(
                start.line,
                start.column + property_indent,
                identifier,
                type_name,
            )
        }
    }
}

fn source_position(position: Position) -> SourcePosition {
    SourcePosition::new(position.line, position.character)
}

/// Run the full command pipeline
///
/// `dialect` selects the grammar. `cursor` picks the enclosing class. `diagnostic_start` picks both the line
/// holding the selector literal and the identifier to declare.
pub fn add_private_property(
    source_text: &str,
    source_path: &Path,
    dialect: SourceDialect,
    cursor: Position,
    diagnostic_start: Position,
    config: &EngineConfig,
) -> Result<FieldInsertion, PropertyError> {
    let ast = parse_source(source_text, dialect)
        .map_err(PropertyError::Parse)?;

    let class = ast
        .class_at(source_position(cursor))
        .ok_or(PropertyError::NotInClass)?;

    let root = load_linked_markup(source_text, source_path)?.ok_or(PropertyError::NoMarkupImport)?;

    let selector = LineIndex::new(source_text)
        .line(diagnostic_start.line as usize)
        .and_then(locate_selector)
        .ok_or(PropertyError::NoSelector {
            line: diagnostic_start.line + 1,
        })?;

    let node = root
        .query_selector(&selector.text_within_quotes)
        .ok_or_else(|| PropertyError::NoMatch {
            selector: selector.text_within_quotes.clone(),
        })?;

    let token = ast
        .identifier_at(source_position(diagnostic_start))
        .ok_or(PropertyError::TokenNotFound)?;

    let type_name = element_type_name(node.tag_name());
    debug!(
        "Declaring '{}' as {} in class {:?}",
        token.value, type_name, class.name
    );

    Ok(plan_insertion(
        class,
        &token.value,
        &type_name,
        config.property_indent,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use queryselector_lsp_source::{PropertyDeclaration, SourceLocation, SourceRange};

    fn range(line: u32, column: u32) -> SourceRange {
        SourceRange::new(
            SourceLocation::new(line, column),
            SourceLocation::new(line, column + 10),
        )
    }

    #[test]
    fn test_element_type_name() {
        assert_eq!(element_type_name("input"), "HTMLInputElement");
        assert_eq!(element_type_name("button"), "HTMLButtonElement");
        assert_eq!(element_type_name("DIV"), "HTMLDivElement");
        assert_eq!(element_type_name("my-widget"), "HTMLMy-widgetElement");
        assert_eq!(element_type_name(""), "HTMLElement");
    }

    #[test]
    fn test_field_insertion_text() {
        let insertion = FieldInsertion::new(3, 4, "submit", "HTMLButtonElement");
        assert_eq!(insertion.text, "    private submit : HTMLButtonElement;\n");

        let edit = insertion.to_text_edit();
        assert_eq!(edit.range.start, Position::new(3, 0));
        assert_eq!(edit.range.end, Position::new(3, 0));
    }

    #[test]
    fn test_insert_into_empty_class() {
        let class = ClassDeclaration {
            name: Some("Login".to_string()),
            range: range(3, 0),
            properties: vec![],
        };
        let insertion = plan_insertion(&class, "el", "HTMLDivElement", 4);
        assert_eq!(insertion.line, 3);
        assert_eq!(insertion.column, 4);
        assert_eq!(insertion.text, "    private el : HTMLDivElement;\n");
    }

    #[test]
    fn test_insert_before_first_field() {
        let class = ClassDeclaration {
            name: Some("Login".to_string()),
            range: range(3, 7),
            properties: vec![
                PropertyDeclaration {
                    name: Some("form".to_string()),
                    range: range(4, 2),
                },
                PropertyDeclaration {
                    name: Some("count".to_string()),
                    range: range(5, 2),
                },
            ],
        };
        let insertion = plan_insertion(&class, "el", "HTMLInputElement", 4);
        // 0-based line 3 is the first field's own line
        assert_eq!(insertion.line, 3);
        assert_eq!(insertion.column, 2);
        assert_eq!(insertion.text, "  private el : HTMLInputElement;\n");
    }

    #[test]
    fn test_unparsable_source() {
        let err = add_private_property(
            "class {",
            Path::new("/tmp/broken.ts"),
            SourceDialect::TypeScript,
            Position::new(0, 0),
            Position::new(0, 0),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PropertyError::Parse(_)));
        assert_eq!(err.to_string(), "Could not parse document");
    }

    #[test]
    fn test_cursor_outside_class() {
        let source = "const a = 1;\nclass A {\n}\n";
        let err = add_private_property(
            source,
            Path::new("/tmp/a.ts"),
            SourceDialect::TypeScript,
            Position::new(0, 3),
            Position::new(0, 3),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Not within a top level class declaration");
    }

    #[test]
    fn test_class_without_markup_import() {
        let source = "class A {\n    go() {}\n}\n";
        let err = add_private_property(
            source,
            Path::new("/tmp/a.ts"),
            SourceDialect::TypeScript,
            Position::new(1, 4),
            Position::new(1, 4),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PropertyError::NoMarkupImport));
    }
}
