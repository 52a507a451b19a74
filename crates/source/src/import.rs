// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Markup import discovery
//!
//! A component declares its markup with an import such as
//! `import template from "./login.html";`. Only the first such import counts.

use std::sync::LazyLock;

use regex::Regex;

static MARKUP_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import.+?from.+("|')(.+\.html)('|")"#).expect("valid regex")
});

/// Return the path of the first markup file imported by `source`
///
/// The path is returned exactly as written, relative paths included.
///
/// # Examples
///
/// ```
/// use queryselector_lsp_source::find_markup_import;
///
/// let source = "import html from './login.html';\nclass Login {}";
/// assert_eq!(find_markup_import(source), Some("./login.html"));
/// ```
pub fn find_markup_import(source: &str) -> Option<&str> {
    MARKUP_IMPORT
        .captures(source)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}
