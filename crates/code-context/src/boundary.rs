//! Boundary scan: given an opener line, find the line where the construct ends.
//!
//! Brace languages balance `{`/`}` from the opener line. Indentation
//! languages walk forward to the first dedent. Neither path understands the
//! language; unbalanced or unterminated input yields `None`.

use crate::config::BoundaryMode;
use crate::language::{BlockStyle, Language};

/// Find the last line of the construct opened at `start_line`
///
/// Returns `None` when the buffer ends before braces balance or before a
/// dedent is seen.
pub fn find_region_end(
    lines: &[String],
    start_line: usize,
    language: Language,
    mode: BoundaryMode,
) -> Option<usize> {
    if start_line >= lines.len() {
        return None;
    }

    let end = match language.block_style() {
        BlockStyle::Braces => find_brace_end(lines, start_line, mode),
        BlockStyle::Indentation => find_dedent_end(lines, start_line),
    };
    log::trace!("boundary scan from line {start_line} ({language}): {end:?}");
    end
}

fn find_brace_end(lines: &[String], start_line: usize, mode: BoundaryMode) -> Option<usize> {
    let mut depth: i64 = 0;
    let mut found_first_brace = false;
    let mut classifier = LiteralClassifier::default();

    for (index, line) in lines.iter().enumerate().skip(start_line) {
        let code = match mode {
            BoundaryMode::Raw => line.chars().collect::<Vec<_>>(),
            BoundaryMode::SkipLiterals => classifier.code_chars(line),
        };

        for ch in code {
            match ch {
                '{' => {
                    depth += 1;
                    found_first_brace = true;
                }
                '}' => {
                    depth -= 1;
                    if found_first_brace && depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
        }
    }

    None
}

fn find_dedent_end(lines: &[String], start_line: usize) -> Option<usize> {
    let opener_indent = indentation(&lines[start_line]);
    let mut last_body_line = None;

    for (index, line) in lines.iter().enumerate().skip(start_line + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if indentation(line) <= opener_indent {
            return last_body_line;
        }
        last_body_line = Some(index);
    }

    None
}

/// Width of the leading whitespace of `line`, in UTF-16 code units
pub fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|ch| ch.is_whitespace())
        .map(char::len_utf16)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LiteralState {
    #[default]
    Code,
    BlockComment,
    Quoted(char),
    Template,
}

/// Minimal character classifier separating code from string literals and
/// comments, carried across lines.
///
/// Single- and double-quoted strings end at the end of their line; block
/// comments and template literals may span lines.
#[derive(Debug, Default)]
struct LiteralClassifier {
    state: LiteralState,
}

impl LiteralClassifier {
    fn code_chars(&mut self, line: &str) -> Vec<char> {
        let mut code = Vec::with_capacity(line.len());
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            match self.state {
                LiteralState::Code => match ch {
                    '/' if chars.peek() == Some(&'/') => break,
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        self.state = LiteralState::BlockComment;
                    }
                    '\'' | '"' => self.state = LiteralState::Quoted(ch),
                    '`' => self.state = LiteralState::Template,
                    _ => code.push(ch),
                },
                LiteralState::BlockComment => {
                    if ch == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        self.state = LiteralState::Code;
                    }
                }
                LiteralState::Quoted(quote) => match ch {
                    '\\' => {
                        chars.next();
                    }
                    _ if ch == quote => self.state = LiteralState::Code,
                    _ => {}
                },
                LiteralState::Template => match ch {
                    '\\' => {
                        chars.next();
                    }
                    '`' => self.state = LiteralState::Code,
                    _ => {}
                },
            }
        }

        if matches!(self.state, LiteralState::Quoted(_)) {
            self.state = LiteralState::Code;
        }
        code
    }
}
