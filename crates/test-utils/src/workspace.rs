// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Temporary component directories
//!
//! Markup is resolved relative to the component source on disk, so tests
//! that load markup need real files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lsp_types::Url;
use tempfile::TempDir;

/// A temp directory holding a component source and, optionally, its markup
///
/// The directory is removed when the workspace is dropped.
pub struct ComponentWorkspace {
    dir: TempDir,
    source_path: PathBuf,
}

impl ComponentWorkspace {
    /// Write `source` under `source_name` and `markup` under `markup_name`
    pub fn create(
        source_name: &str,
        source: &str,
        markup_name: &str,
        markup: &str,
    ) -> io::Result<Self> {
        let workspace = Self::source_only(source_name, source)?;
        workspace.write_file(markup_name, markup)?;
        Ok(workspace)
    }

    /// Write only the component source
    pub fn source_only(source_name: &str, source: &str) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let source_path = dir.path().join(source_name);
        if let Some(parent) = source_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&source_path, source)?;
        Ok(Self { dir, source_path })
    }

    /// Write an extra file relative to the workspace root
    pub fn write_file(&self, relative: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Workspace root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of the component source
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// `file://` URI of the component source
    pub fn source_uri(&self) -> Option<Url> {
        Url::from_file_path(&self.source_path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_writes_both_files() {
        let ws = ComponentWorkspace::create("src/a.ts", "class A {}", "src/a.html", "<p></p>").unwrap();
        assert_eq!(fs::read_to_string(ws.source_path()).unwrap(), "class A {}");
        assert!(ws.path().join("src/a.html").is_file());
        assert!(ws.source_uri().unwrap().as_str().ends_with("/src/a.ts"));
    }
}
