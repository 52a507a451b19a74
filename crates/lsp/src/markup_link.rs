// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Markup link resolution
//!
//! Finds the markup file a component imports, resolves it next to the
//! component source and parses it. Nothing is cached: every request reads
//! and parses the file again.

use std::path::{Path, PathBuf};

use queryselector_lsp_markup::{MarkupError, MarkupNode, parse_markup};
use queryselector_lsp_source::find_markup_import;
use tracing::debug;

/// Errors raised while loading a linked markup file
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The import resolved to a path that does not exist
    #[error("Html file {} was not found.", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be parsed
    #[error("Failed to parse markup: {0}")]
    Markup(#[from] MarkupError),
}

/// A markup import found in component source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupLink {
    /// Module specifier as written in the import
    pub specifier: String,
    /// Specifier resolved against the source file's directory
    pub path: PathBuf,
}

impl MarkupLink {
    /// Find the first markup import in `source_text`
    ///
    /// `None` is the ordinary outcome for sources that import no markup.
    pub fn find(source_text: &str, source_path: &Path) -> Option<Self> {
        let specifier = find_markup_import(source_text)?;
        let path = resolve_markup_path(source_path, specifier);
        Some(Self {
            specifier: specifier.to_string(),
            path,
        })
    }

    /// Read and parse the linked file
    pub fn load(&self) -> Result<MarkupNode, LinkError> {
        debug!(
            "Loading markup import '{}' from {}",
            self.specifier,
            self.path.display()
        );
        if !self.path.is_file() {
            return Err(LinkError::FileNotFound {
                path: self.path.clone(),
            });
        }

        let text = std::fs::read_to_string(&self.path).map_err(|source| LinkError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(parse_markup(&text)?)
    }
}

/// Resolve an import specifier relative to the importing file's directory
pub fn resolve_markup_path(source_path: &Path, specifier: &str) -> PathBuf {
    let base = source_path.parent().unwrap_or_else(|| Path::new(""));
    base.join(specifier)
}

/// Find, resolve and parse the markup linked from `source_text`
///
/// Returns `Ok(None)` when the source imports no markup.
pub fn load_linked_markup(
    source_text: &str,
    source_path: &Path,
) -> Result<Option<MarkupNode>, LinkError> {
    match MarkupLink::find(source_text, source_path) {
        Some(link) => link.load().map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_to_source_dir() {
        let path = resolve_markup_path(Path::new("/app/src/login.ts"), "./login.html");
        assert_eq!(path, Path::new("/app/src/./login.html"));

        let path = resolve_markup_path(Path::new("/app/src/login.ts"), "../views/login.html");
        assert_eq!(path, Path::new("/app/src/../views/login.html"));
    }

    #[test]
    fn test_no_import_is_not_an_error() {
        let result = load_linked_markup("class A {}", Path::new("/tmp/a.ts")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_file_reports_resolved_path() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("widget.ts");
        let err = load_linked_markup("import t from './widget.html';", &source_path).unwrap_err();

        let expected = dir.path().join("./widget.html");
        assert!(matches!(&err, LinkError::FileNotFound { path } if *path == expected));
        assert_eq!(
            err.to_string(),
            format!("Html file {} was not found.", expected.display())
        );
    }

    #[test]
    fn test_loads_and_parses_linked_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("widget.html"), r#"<div id="root"></div>"#).unwrap();
        let source_path = dir.path().join("widget.ts");

        let root = load_linked_markup("import t from \"./widget.html\";", &source_path)
            .unwrap()
            .unwrap();
        assert!(root.query_selector("#root").is_some());
    }
}
