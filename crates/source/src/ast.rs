// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Component source AST
//!
//! A flattened view of a TypeScript module, parsed with
//! tree-sitter-typescript: the top-level class declarations with their field
//! declarations, and the full token stream. Locations use 1-based lines.

use std::path::Path;

use tracing::debug;
use tree_sitter::{Language, Node, Parser, Point};

use crate::error::{SourceError, SourceResult};
use crate::location::{LineIndex, Position, SourceLocation, SourceRange};

/// Grammar flavour used to parse a component source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceDialect {
    /// `.ts` / `.js`
    #[default]
    TypeScript,
    /// `.tsx` / `.jsx`
    Tsx,
}

impl SourceDialect {
    /// Map an LSP language id to a dialect
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id {
            "typescript" | "javascript" => Some(SourceDialect::TypeScript),
            "typescriptreact" | "javascriptreact" => Some(SourceDialect::Tsx),
            _ => None,
        }
    }

    /// Pick a dialect from a file extension, defaulting to TypeScript
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx" | "jsx") => SourceDialect::Tsx,
            _ => SourceDialect::TypeScript,
        }
    }

    fn language(self) -> Language {
        match self {
            SourceDialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceDialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Punctuator,
    Literal,
    Other,
}

/// A leaf of the syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub range: SourceRange,
}

/// A field declaration inside a class body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    pub name: Option<String>,
    pub range: SourceRange,
}

/// A top-level class declaration, exported or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub name: Option<String>,
    /// Starts at the `class` (or `abstract`) keyword, never at `export` or a decorator
    pub range: SourceRange,
    /// Field declarations in declaration order
    pub properties: Vec<PropertyDeclaration>,
}

/// Parsed component source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceAst {
    pub classes: Vec<ClassDeclaration>,
    pub tokens: Vec<Token>,
}

impl SourceAst {
    /// Parse source text; any syntax error fails the whole parse
    ///
    /// # Examples
    ///
    /// ```
    /// use queryselector_lsp_source::{SourceAst, SourceDialect};
    ///
    /// let ast = SourceAst::parse("export class A {\n    x = 1;\n}\n", SourceDialect::TypeScript).unwrap();
    /// assert_eq!(ast.classes.len(), 1);
    /// assert_eq!(ast.classes[0].properties.len(), 1);
    /// ```
    pub fn parse(text: &str, dialect: SourceDialect) -> SourceResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| SourceError::Language(e.to_string()))?;

        let tree = parser
            .parse(text, None)
            .ok_or_else(|| SourceError::ParseFailed("tree-sitter returned no tree".to_string()))?;

        let root = tree.root_node();
        let index = LineIndex::new(text);

        if root.has_error() {
            let location = first_error(root)
                .map(|node| index.location(node.start_position()))
                .unwrap_or(SourceLocation::new(1, 0));
            debug!("Source has a syntax error at {:?}", location);
            return Err(SourceError::Syntax { location });
        }

        let source = text.as_bytes();
        Ok(Self {
            classes: collect_classes(root, source, &index),
            tokens: collect_tokens(root, source, &index),
        })
    }

    /// First identifier token whose range contains the position
    pub fn identifier_at(&self, position: Position) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.kind == TokenKind::Identifier && t.range.contains(position))
    }

    /// First top-level class whose range contains the position
    pub fn class_at(&self, position: Position) -> Option<&ClassDeclaration> {
        self.classes.iter().find(|c| c.range.contains(position))
    }
}

/// Parse source text; see [`SourceAst::parse`]
pub fn parse_source(text: &str, dialect: SourceDialect) -> SourceResult<SourceAst> {
    SourceAst::parse(text, dialect)
}

const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration", "class"];

const FIELD_KINDS: &[&str] = &["public_field_definition", "field_definition"];

const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "property_identifier",
    "type_identifier",
    "private_property_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
];

const LITERAL_KINDS: &[&str] = &[
    "string_fragment",
    "escape_sequence",
    "number",
    "regex_pattern",
    "regex_flags",
];

fn range_of(node: Node<'_>, index: &LineIndex<'_>) -> SourceRange {
    SourceRange::new(
        index.location(node.start_position()),
        index.location(node.end_position()),
    )
}

fn node_text(node: Node<'_>, source: &[u8]) -> Option<String> {
    node.utf8_text(source).ok().map(str::to_string)
}

fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

// ── Classes ────────────────────────────────────────────────────────────

fn collect_classes(root: Node<'_>, source: &[u8], index: &LineIndex<'_>) -> Vec<ClassDeclaration> {
    let mut classes = Vec::new();
    let mut cursor = root.walk();

    for node in root.named_children(&mut cursor) {
        let class_node = match node.kind() {
            "class_declaration" | "abstract_class_declaration" => Some(node),
            // `export class` / `export default class`
            "export_statement" => node
                .child_by_field_name("declaration")
                .or_else(|| node.child_by_field_name("value"))
                .filter(|d| CLASS_KINDS.contains(&d.kind())),
            _ => None,
        };

        if let Some(class_node) = class_node {
            classes.push(class_declaration(class_node, source, index));
        }
    }

    classes
}

fn class_declaration(node: Node<'_>, source: &[u8], index: &LineIndex<'_>) -> ClassDeclaration {
    let name = node
        .child_by_field_name("name")
        .and_then(|n| node_text(n, source));

    let mut properties = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            if !FIELD_KINDS.contains(&member.kind()) {
                continue;
            }
            properties.push(PropertyDeclaration {
                name: member
                    .child_by_field_name("name")
                    .and_then(|n| node_text(n, source)),
                range: range_of(member, index),
            });
        }
    }

    ClassDeclaration {
        name,
        range: SourceRange::new(
            index.location(class_keyword_start(node)),
            index.location(node.end_position()),
        ),
        properties,
    }
}

/// Start of the `class`/`abstract` keyword, past any decorators
fn class_keyword_start(node: Node<'_>) -> Point {
    let mut cursor = node.walk();
    let keyword = node
        .children(&mut cursor)
        .find(|c| c.kind() != "decorator" && !c.kind().contains("comment"));
    keyword.map_or(node.start_position(), |k| k.start_position())
}

// ── Tokens ─────────────────────────────────────────────────────────────

fn collect_tokens(root: Node<'_>, source: &[u8], index: &LineIndex<'_>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.child_count() > 0 {
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
            continue;
        }

        if node.kind().contains("comment") || node.start_byte() == node.end_byte() {
            continue;
        }

        let Some(value) = node_text(node, source) else {
            continue;
        };

        tokens.push(Token {
            kind: classify_token(node, &value),
            value,
            range: range_of(node, index),
        });
    }

    tokens
}

fn classify_token(node: Node<'_>, value: &str) -> TokenKind {
    let kind = node.kind();
    if IDENTIFIER_KINDS.contains(&kind) {
        TokenKind::Identifier
    } else if LITERAL_KINDS.contains(&kind) {
        TokenKind::Literal
    } else if node.is_named() {
        TokenKind::Other
    } else if value.starts_with(|c: char| c.is_ascii_alphabetic()) {
        TokenKind::Keyword
    } else {
        TokenKind::Punctuator
    }
}
