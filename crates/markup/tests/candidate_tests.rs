// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Candidate extraction and selector lookup over realistic component markup

use queryselector_lsp_markup::{AttributeCandidate, CandidateIndex, MarkupNode, Traverser, parse_markup};

const LOGIN_FORM: &str = r#"
<form id="login" data-test="login-form">
  <label for="user">User</label>
  <input id="user" name="user" data-testid="user-input">
  <input id="pass" type="password" data-testid="pass-input">
  <!-- <button id="commented-out"></button> -->
  <div class="actions">
    <button id="submit" type="submit" data-test="submit">Sign in</button>
    <button id="cancel" data-test="cancel">Cancel</button>
  </div>
  <template>
    <span id="submit" data-test="submit"></span>
  </template>
</form>
"#;

#[test]
fn test_ids_in_document_order_without_duplicates() {
    let root = parse_markup(LOGIN_FORM).unwrap();
    let index = CandidateIndex::build_default(&root);
    assert_eq!(index.ids, vec!["login", "user", "pass", "submit", "cancel"]);
}

#[test]
fn test_attribute_candidates() {
    let root = parse_markup(LOGIN_FORM).unwrap();
    let index = CandidateIndex::build_default(&root);
    assert_eq!(
        index.attributes,
        vec![
            AttributeCandidate::new("data-test", "login-form"),
            AttributeCandidate::new("data-testid", "user-input"),
            AttributeCandidate::new("data-testid", "pass-input"),
            AttributeCandidate::new("data-test", "submit"),
            AttributeCandidate::new("data-test", "cancel"),
        ]
    );
}

#[test]
fn test_query_selector_returns_first_match() {
    let root = parse_markup(LOGIN_FORM).unwrap();
    assert_eq!(root.query_selector("#submit").unwrap().tag_name(), "button");
    assert_eq!(
        root.query_selector(r#"[data-testid="pass-input"]"#)
            .unwrap()
            .attribute("type"),
        Some("password")
    );
    assert_eq!(root.query_selector("div.actions").unwrap().children().len(), 2);
    assert!(root.query_selector("#commented-out").is_none());
    assert!(root.query_selector("#missing").is_none());
}

#[test]
fn test_parent_result_precedes_descendants() {
    let root = parse_markup(LOGIN_FORM).unwrap();
    let traverser = Traverser::new()
        .with_check(|node: &MarkupNode| node.id().map(str::to_string))
        .with_check(|node: &MarkupNode| {
            node.attribute("data-test").map(|v| v.to_string())
        });
    let (((), ids), tests) = traverser.traverse(&root);

    let login = ids.iter().position(|id| id == "login").unwrap();
    let user = ids.iter().position(|id| id == "user").unwrap();
    assert!(login < user);
    assert_eq!(tests.first().map(String::as_str), Some("login-form"));
    assert_eq!(tests.len(), 4);
}

#[test]
fn test_unclosed_markup_still_yields_candidates() {
    let root = parse_markup(r#"<div id="shell"><button id="go" data-test="go">"#).unwrap();
    let index = CandidateIndex::build_default(&root);
    assert!(index.ids.contains(&"shell".to_string()));
    assert!(index.ids.contains(&"go".to_string()));
}

#[test]
fn test_attribute_candidates_use_decoded_values() {
    let root = parse_markup(r#"<div data-x="a&amp;b"></div>"#).unwrap();
    let index = CandidateIndex::build_default(&root);
    assert_eq!(index.attributes, vec![AttributeCandidate::new("data-x", "a&b")]);
    assert_eq!(index.attributes[0].selector(), r#"[data-x="a&b"]"#);
}
