use serde::{Deserialize, Serialize};
use std::fmt;

/// A 0-based `(line, column)` location
///
/// Columns count UTF-16 code units, matching editor cursor indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open span between two positions of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub start: Position,
    pub end: Position,
}

impl Region {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Region covering `start_line..=end_line`, ending after `end_column`
    #[must_use]
    pub const fn lines(start_line: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start: Position::new(start_line, 0),
            end: Position::new(end_line, end_column),
        }
    }

    /// Number of lines touched by this region
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }

    /// Whether `position` falls inside the region (end inclusive)
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// Whether the region spans no text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Length of `text` in UTF-16 code units
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Convert a byte offset within `text` to a UTF-16 column
pub fn byte_to_utf16(text: &str, byte_offset: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        if idx >= byte_offset {
            break;
        }
        units += ch.len_utf16();
    }
    units
}

/// Convert a UTF-16 column to a byte offset within `text`
///
/// Columns past the end of the text clamp to its length; a column that
/// splits a surrogate pair rounds down to the start of that character.
pub fn utf16_to_byte(text: &str, column: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > column {
            return idx;
        }
        units = next;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_contains_is_end_inclusive() {
        let region = Region::new(Position::new(1, 4), Position::new(3, 2));
        assert!(region.contains(Position::new(1, 4)));
        assert!(region.contains(Position::new(2, 100)));
        assert!(region.contains(Position::new(3, 2)));
        assert!(!region.contains(Position::new(3, 3)));
        assert!(!region.contains(Position::new(1, 3)));
        assert_eq!(region.line_count(), 3);
    }

    #[test]
    fn test_utf16_conversions() {
        // 'é' is 2 bytes / 1 unit, '😀' is 4 bytes / 2 units
        let text = "é😀x";
        assert_eq!(utf16_len(text), 4);
        assert_eq!(byte_to_utf16(text, 0), 0);
        assert_eq!(byte_to_utf16(text, 2), 1);
        assert_eq!(byte_to_utf16(text, 6), 3);
        assert_eq!(byte_to_utf16(text, text.len()), 4);

        assert_eq!(utf16_to_byte(text, 1), 2);
        assert_eq!(utf16_to_byte(text, 2), 2);
        assert_eq!(utf16_to_byte(text, 3), 6);
        assert_eq!(utf16_to_byte(text, 40), text.len());
    }

    #[test]
    fn test_display() {
        let region = Region::lines(0, 2, 1);
        assert_eq!(region.to_string(), "0:0-2:1");
    }
}
