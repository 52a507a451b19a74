// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Cursor markers
//!
//! Test sources mark the cursor with `|`. Selector literals and TypeScript
//! in the fixtures never need a literal pipe.

use lsp_types::Position;

/// Marker character for the cursor position
pub const CURSOR_MARKER: char = '|';

/// Editor position (0-based line, UTF-16 column) of the cursor marker
pub fn get_cursor_position(input: &str) -> Option<Position> {
    let offset = input.find(CURSOR_MARKER)?;
    let before = &input[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let character = before[line_start..].encode_utf16().count();
    Some(Position::new(line as u32, character as u32))
}

/// Remove cursor marker from input
pub fn remove_cursor_marker(input: &str) -> String {
    input.replacen(CURSOR_MARKER, "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_position() {
        let input = "class A {\n    x = document.querySelector(\"#|\");\n}";
        assert_eq!(get_cursor_position(input), Some(Position::new(1, 33)));
        assert_eq!(
            remove_cursor_marker(input),
            "class A {\n    x = document.querySelector(\"#\");\n}"
        );
    }

    #[test]
    fn test_cursor_after_wide_chars() {
        assert_eq!(get_cursor_position("é😀|"), Some(Position::new(0, 3)));
        assert_eq!(get_cursor_position("no marker"), None);
    }
}
