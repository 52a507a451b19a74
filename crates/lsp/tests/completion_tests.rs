// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Completion integration tests
//!
//! Each test writes a component and its markup to a temp directory and asks
//! the engine for completions at the `|` marker.

use queryselector_lsp_lsp::completion::CompletionEngine;
use queryselector_lsp_lsp::{CompletionError, EngineConfig, LinkError};
use queryselector_lsp_test_utils::{
    ComponentFixtures, ComponentWorkspace, assert_has_label, assert_no_label,
    get_cursor_position, remove_cursor_marker,
};
use tower_lsp::lsp_types::{CompletionItem, CompletionList, CompletionTextEdit, Position, Range};

fn complete_with(
    config: EngineConfig,
    marked_source: &str,
    markup: Option<&str>,
) -> Result<Option<CompletionList>, CompletionError> {
    let position = get_cursor_position(marked_source).expect("cursor marker");
    let source = remove_cursor_marker(marked_source);
    let workspace = match markup {
        Some(markup) => ComponentWorkspace::create("login.ts", &source, "login.html", markup),
        None => ComponentWorkspace::source_only("login.ts", &source),
    }
    .expect("temp workspace");

    CompletionEngine::new(config).complete(&source, workspace.source_path(), position)
}

fn complete(marked_source: &str) -> Vec<CompletionItem> {
    complete_with(
        EngineConfig::default(),
        marked_source,
        Some(ComponentFixtures::login_markup()),
    )
    .expect("completion succeeds")
    .expect("completion list")
    .items
}

fn edit_of(item: &CompletionItem) -> (Range, String) {
    match item.text_edit.as_ref() {
        Some(CompletionTextEdit::Edit(edit)) => (edit.range, edit.new_text.clone()),
        other => panic!("Expected a plain text edit, got {:?}", other),
    }
}

#[test]
fn test_ids_after_hash_in_unterminated_literal() {
    let source = ComponentFixtures::completion_after_hash();
    let cursor = get_cursor_position(source).unwrap();
    let items = complete(source);

    for label in ["#login", "#user", "#pass", "#sub-button", "#submit"] {
        assert_has_label(&items, label);
    }
    let ids = items.iter().filter(|i| i.label.starts_with('#')).count();
    assert_eq!(ids, 5, "duplicate ids are collapsed");

    let submit = assert_has_label(&items, "#submit");
    assert_eq!(submit.sort_text.as_deref(), Some("#submit"));
    let (range, text) = edit_of(submit);
    assert_eq!(text, "#submit");
    // "#sub" is replaced, the quote before it is kept
    assert_eq!(range.start, Position::new(cursor.line, cursor.character - 4));
    assert_eq!(range.end, cursor);
    assert!(submit.additional_text_edits.is_none());
}

#[test]
fn test_ids_come_before_attributes() {
    let items = complete(ComponentFixtures::completion_after_hash());
    let first_attribute = items
        .iter()
        .position(|i| i.label.starts_with('['))
        .expect("attribute candidates");
    assert!(items[..first_attribute].iter().all(|i| i.label.starts_with('#')));
    assert!(items[first_attribute..].iter().all(|i| i.label.starts_with('[')));
}

#[test]
fn test_attribute_selector_rewrites_quotes() {
    let source = ComponentFixtures::completion_after_bracket();
    let cursor = get_cursor_position(source).unwrap();
    let items = complete(source);

    assert_has_label(&items, r#"[data-test="login-form"]"#);
    assert_has_label(&items, r#"[data-testid="pass-input"]"#);
    assert_no_label(&items, r#"[type="password"]"#);
    let x_count = items.iter().filter(|i| i.label == r#"[data-test="x"]"#).count();
    assert_eq!(x_count, 1);

    let ok = assert_has_label(&items, r#"[data-testid="ok"]"#);
    assert_eq!(ok.filter_text.as_deref(), Some(r#"[data-testid="ok"]"#));
    let (range, text) = edit_of(ok);
    assert_eq!(text, "[data-testid=\"ok\"]`");
    // "[" and the closing quote are replaced
    assert_eq!(range.start, Position::new(cursor.line, cursor.character - 1));
    assert_eq!(range.end, Position::new(cursor.line, cursor.character + 1));

    let quote_edits = ok.additional_text_edits.as_ref().expect("opening quote edit");
    assert_eq!(quote_edits.len(), 1);
    assert_eq!(quote_edits[0].new_text, "`");
    assert_eq!(
        quote_edits[0].range,
        Range::new(
            Position::new(cursor.line, cursor.character - 2),
            Position::new(cursor.line, cursor.character - 1),
        )
    );
}

#[test]
fn test_template_literal_keeps_its_quotes() {
    let source = ComponentFixtures::completion_in_template_literal();
    let cursor = get_cursor_position(source).unwrap();
    let items = complete(source);

    let user = assert_has_label(&items, "#user");
    assert_eq!(user.sort_text.as_deref(), Some("user"));
    let (range, _) = edit_of(user);
    assert_eq!(range, Range::new(cursor, cursor));

    let form = assert_has_label(&items, r#"[data-test="login-form"]"#);
    assert_eq!(form.filter_text.as_deref(), Some(r#"data-test="login-form""#));
    assert!(form.additional_text_edits.is_none());
}

#[test]
fn test_custom_attribute_prefixes() {
    let config = EngineConfig {
        attribute_prefixes: vec!["type".to_string()],
        ..Default::default()
    };
    let items = complete_with(
        config,
        ComponentFixtures::completion_after_bracket(),
        Some(ComponentFixtures::login_markup()),
    )
    .unwrap()
    .unwrap()
    .items;

    assert_has_label(&items, r#"[type="password"]"#);
    assert_no_label(&items, r#"[data-testid="ok"]"#);
}

#[test]
fn test_no_completion_outside_selector_literal() {
    let result = complete_with(
        EngineConfig::default(),
        ComponentFixtures::completion_outside_selector(),
        Some(ComponentFixtures::login_markup()),
    )
    .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_no_completion_without_markup_import() {
    let source = "export class A {\n    go() {\n        document.querySelector(\"#|\n    }\n}\n";
    let result = complete_with(EngineConfig::default(), source, None).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_missing_markup_file_is_an_error() {
    let err = complete_with(
        EngineConfig::default(),
        ComponentFixtures::completion_after_hash(),
        None,
    )
    .unwrap_err();

    assert!(matches!(err, CompletionError::Link(LinkError::FileNotFound { .. })));
    assert!(!err.should_return_empty());
    assert!(err.to_string().contains("login.html was not found."));
}
