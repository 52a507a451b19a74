// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Source locations
//!
//! Two coordinate systems meet here:
//!
//! - [`Position`]: editor cursor, 0-based line and 0-based UTF-16 column
//! - [`SourceLocation`]: parser location, 1-based line and 0-based UTF-16 column
//!
//! [`is_within`] compares a cursor against a parser range.

use tree_sitter::Point;

/// Editor cursor position (0-based line, 0-based column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Parser location (1-based line, 0-based column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A parser range; `start` never comes after `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Boundary-inclusive containment, see [`is_within`]
    pub fn contains(&self, position: Position) -> bool {
        is_within(position, self.start, self.end)
    }
}

/// Whether a cursor position falls inside a parser range.
///
/// Both boundaries are inclusive, so a cursor sitting exactly between two
/// adjacent tokens is within both of them. Callers pick the first match.
///
/// # Examples
///
/// ```
/// use queryselector_lsp_source::{Position, SourceLocation, is_within};
///
/// let start = SourceLocation::new(3, 4);
/// let end = SourceLocation::new(3, 10);
/// assert!(is_within(Position::new(2, 4), start, end));
/// assert!(is_within(Position::new(2, 10), start, end));
/// assert!(!is_within(Position::new(2, 11), start, end));
/// assert!(!is_within(Position::new(3, 5), start, end));
/// ```
pub fn is_within(position: Position, start: SourceLocation, end: SourceLocation) -> bool {
    let line = position.line.saturating_add(1);

    let after_start =
        line > start.line || (line == start.line && position.character >= start.column);
    let before_end = line < end.line || (line == end.line && position.character <= end.column);

    after_start && before_end
}

/// Line start offsets for converting between byte offsets and editor columns
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (idx, ch) in text.char_indices() {
            if ch == '\n' {
                line_starts.push(idx + ch.len_utf8());
            }
        }
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 0-based line without its line ending
    pub fn line(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        Some(self.text[start..end].trim_end_matches(['\r', '\n']))
    }

    /// Convert a byte column within a 0-based line into a UTF-16 column
    pub fn utf16_column(&self, line: usize, byte_column: usize) -> u32 {
        let Some(&start) = self.line_starts.get(line) else {
            return 0;
        };
        let end = (start + byte_column).min(self.text.len());
        let prefix = self.text.get(start..end).unwrap_or("");
        u32::try_from(prefix.encode_utf16().count()).unwrap_or(u32::MAX)
    }

    /// Convert a tree-sitter point into a parser location
    pub fn location(&self, point: Point) -> SourceLocation {
        SourceLocation {
            line: u32::try_from(point.row + 1).unwrap_or(u32::MAX),
            column: self.utf16_column(point.row, point.column),
        }
    }
}

/// Length of `text` in UTF-16 code units
pub fn utf16_len(text: &str) -> u32 {
    u32::try_from(text.encode_utf16().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_within_inclusive_boundaries() {
        let start = SourceLocation::new(1, 2);
        let end = SourceLocation::new(4, 1);
        // start boundary, converted to 0-based line
        assert!(is_within(Position::new(0, 2), start, end));
        // end boundary
        assert!(is_within(Position::new(3, 1), start, end));
        assert!(!is_within(Position::new(0, 1), start, end));
        assert!(!is_within(Position::new(3, 2), start, end));
    }

    #[test]
    fn test_is_within_middle_lines_ignore_columns() {
        let start = SourceLocation::new(1, 10);
        let end = SourceLocation::new(5, 0);
        assert!(is_within(Position::new(2, 0), start, end));
        assert!(is_within(Position::new(3, 200), start, end));
        assert!(!is_within(Position::new(5, 0), start, end));
    }

    #[test]
    fn test_adjacent_ranges_both_match_at_shared_boundary() {
        let first = SourceRange::new(SourceLocation::new(1, 0), SourceLocation::new(1, 4));
        let second = SourceRange::new(SourceLocation::new(1, 4), SourceLocation::new(1, 9));
        let cursor = Position::new(0, 4);
        assert!(first.contains(cursor));
        assert!(second.contains(cursor));
    }

    #[test]
    fn test_line_index_lines() {
        let index = LineIndex::new("a\r\nbc\n\nd");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line(0), Some("a"));
        assert_eq!(index.line(1), Some("bc"));
        assert_eq!(index.line(2), Some(""));
        assert_eq!(index.line(3), Some("d"));
        assert_eq!(index.line(4), None);
    }

    #[test]
    fn test_utf16_column() {
        let index = LineIndex::new("x\nconst é = \"😀\";");
        // "const é" is 8 bytes but 7 UTF-16 units
        assert_eq!(index.utf16_column(1, 8), 7);
        let emoji_end = "const é = \"😀".len();
        assert_eq!(index.utf16_column(1, emoji_end), 13);
        assert_eq!(utf16_len("😀"), 2);
    }
}
