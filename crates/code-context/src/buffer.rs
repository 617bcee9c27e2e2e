use crate::language::Language;
use crate::position::{utf16_len, utf16_to_byte, Position, Region};

/// An immutable text buffer split into lines, tagged with its language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    language: Language,
}

impl TextBuffer {
    /// Split `text` on `\n`; a trailing `\r` on each line is dropped
    pub fn new(text: &str, language: Language) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines, language }
    }

    /// Build a buffer from pre-split lines
    pub fn from_lines<I, S>(lines: I, language: Language) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Length of a line in UTF-16 code units, 0 past the end of the buffer
    pub fn line_len(&self, index: usize) -> usize {
        self.line(index).map(utf16_len).unwrap_or(0)
    }

    /// Region spanning the whole of one line
    pub fn line_region(&self, index: usize) -> Region {
        Region::new(Position::new(index, 0), Position::new(index, self.line_len(index)))
    }

    /// Text covered by `region`, lines joined with `\n`
    ///
    /// Positions outside the buffer are clamped.
    pub fn text(&self, region: &Region) -> String {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return String::new();
        };
        let start_line = region.start.line.min(last);
        let end_line = region.end.line.min(last);
        if start_line > end_line {
            return String::new();
        }

        let mut out = String::new();
        for index in start_line..=end_line {
            let line = &self.lines[index];
            let from = if index == start_line {
                utf16_to_byte(line, region.start.column)
            } else {
                0
            };
            let to = if index == end_line {
                utf16_to_byte(line, region.end.column)
            } else {
                line.len()
            };
            if index > start_line {
                out.push('\n');
            }
            if from < to {
                out.push_str(&line[from..to]);
            }
        }
        out
    }
}
