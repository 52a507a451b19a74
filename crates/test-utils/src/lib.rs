// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for queryselector-lsp
//!
//! This crate provides common testing components including:
//! - Sample component markup and source
//! - Cursor markers in test source
//! - Temporary component directories
//! - Completion assertions

pub mod assertions;
pub mod cursor;
pub mod fixtures;
pub mod workspace;

// Re-exports for convenience
pub use assertions::{assert_has_label, assert_no_label, find_item};
pub use cursor::{get_cursor_position, remove_cursor_marker};
pub use fixtures::ComponentFixtures;
pub use workspace::ComponentWorkspace;
