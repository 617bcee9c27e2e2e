use crate::boundary::find_region_end;
use crate::buffer::TextBuffer;
use crate::config::{BoundaryMode, ResolverConfig};
use crate::names;
use crate::patterns::{PatternCategory, PatternTables};
use crate::position::{byte_to_utf16, Position, Region};
use crate::types::{CodeContext, ContextKind};

/// Resolves a cursor position to the code region around it
///
/// The resolver holds no state between queries; every call reads only the
/// buffer and position it is given.
#[derive(Debug, Clone, Copy)]
pub struct RegionResolver<'a> {
    tables: &'a PatternTables,
    mode: BoundaryMode,
}

impl<'a> RegionResolver<'a> {
    /// Create a resolver over pattern tables, counting braces in raw mode
    #[must_use]
    pub const fn new(tables: &'a PatternTables) -> Self {
        Self {
            tables,
            mode: BoundaryMode::Raw,
        }
    }

    /// Create a resolver using the boundary mode of `config`
    #[must_use]
    pub const fn with_config(tables: &'a PatternTables, config: &ResolverConfig) -> Self {
        Self {
            tables,
            mode: config.boundary_mode,
        }
    }

    /// Builder: set boundary mode
    #[must_use]
    pub const fn boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn tables(&self) -> &'a PatternTables {
        self.tables
    }

    /// Nearest function opener at or above `position` whose body can be closed
    pub fn find_function_at_position(&self, buffer: &TextBuffer, position: Position) -> Option<Region> {
        self.find_block(buffer, position, PatternCategory::Function)
    }

    /// Nearest class opener at or above `position` whose body can be closed
    pub fn find_class_at_position(&self, buffer: &TextBuffer, position: Position) -> Option<Region> {
        self.find_block(buffer, position, PatternCategory::Class)
    }

    /// Variable declaration on the cursor line whose span contains the column
    ///
    /// Each pattern contributes its first match on the line. The span check
    /// is inclusive at both ends, so a cursor just past the matched text
    /// still hits.
    pub fn find_variable_at_position(&self, buffer: &TextBuffer, position: Position) -> Option<Region> {
        let line = buffer.line(position.line)?;
        let language = buffer.language();

        for pattern in self.tables.patterns_for(language, PatternCategory::Variable) {
            let Some(found) = pattern.find(line) else {
                continue;
            };
            let start = byte_to_utf16(line, found.start());
            let end = byte_to_utf16(line, found.end());
            if (start..=end).contains(&position.column) {
                log::debug!(
                    "variable declaration at {}:{start}-{end} matched {}",
                    position.line,
                    pattern.as_str()
                );
                return Some(Region::new(
                    Position::new(position.line, start),
                    Position::new(position.line, end),
                ));
            }
        }

        None
    }

    /// Classify `position` into exactly one context
    ///
    /// Precedence is function, variable, class, import line, comment line;
    /// when nothing matches the raw line is returned as `Unknown`.
    pub fn get_context_at_position(&self, buffer: &TextBuffer, position: Position) -> CodeContext {
        let language = buffer.language();

        let Some(line) = buffer.line(position.line) else {
            log::debug!("position {position} is outside a {}-line buffer", buffer.line_count());
            let clamped = Position::new(position.line.min(buffer.line_count().saturating_sub(1)), 0);
            return CodeContext::new(ContextKind::Unknown, String::new(), Region::new(clamped, clamped));
        };

        for kind in ContextKind::PRECEDENCE {
            let region = match kind {
                ContextKind::Function => self.find_function_at_position(buffer, position),
                ContextKind::Variable => self.find_variable_at_position(buffer, position),
                ContextKind::Class => self.find_class_at_position(buffer, position),
                ContextKind::Import => self
                    .tables
                    .is_import_line(language, line)
                    .then(|| buffer.line_region(position.line)),
                ContextKind::Comment => self
                    .tables
                    .is_comment_line(language, line)
                    .then(|| buffer.line_region(position.line)),
                ContextKind::Unknown => Some(buffer.line_region(position.line)),
            };

            if let Some(region) = region {
                let text = buffer.text(&region);
                let name = self.extract_name(kind, &text, buffer);
                return CodeContext::new(kind, text, region).with_name(name);
            }
        }

        // ContextKind::Unknown always produces a region above
        CodeContext::new(ContextKind::Unknown, line.to_string(), buffer.line_region(position.line))
    }

    /// Name of the function declared in `text`
    pub fn extract_function_name(&self, text: &str, buffer: &TextBuffer) -> Option<String> {
        names::extract_function_name(self.tables, text, buffer.language())
    }

    /// Name of the variable declared in `text`
    pub fn extract_variable_name(&self, text: &str, buffer: &TextBuffer) -> Option<String> {
        names::extract_variable_name(self.tables, text, buffer.language())
    }

    /// Name of the class declared in `text`
    pub fn extract_class_name(&self, text: &str, buffer: &TextBuffer) -> Option<String> {
        names::extract_class_name(self.tables, text, buffer.language())
    }

    fn extract_name(&self, kind: ContextKind, text: &str, buffer: &TextBuffer) -> Option<String> {
        match kind {
            ContextKind::Function => self.extract_function_name(text, buffer),
            ContextKind::Variable => self.extract_variable_name(text, buffer),
            ContextKind::Class => self.extract_class_name(text, buffer),
            ContextKind::Import | ContextKind::Comment | ContextKind::Unknown => None,
        }
    }

    fn find_block(
        &self,
        buffer: &TextBuffer,
        position: Position,
        category: PatternCategory,
    ) -> Option<Region> {
        if position.line >= buffer.line_count() {
            return None;
        }

        let language = buffer.language();
        let patterns = self.tables.patterns_for(language, category);
        let lines = buffer.lines();

        for index in (0..=position.line).rev() {
            let Some(pattern) = patterns.iter().find(|pattern| pattern.is_match(&lines[index]))
            else {
                continue;
            };
            log::trace!(
                "{} opener candidate at line {index}: {}",
                category.as_str(),
                pattern.as_str()
            );
            // An opener whose body never closes is skipped; keep looking further up
            if let Some(end) = find_region_end(lines, index, language, self.mode) {
                log::debug!("{} region {index}..={end}", category.as_str());
                return Some(Region::lines(index, end, buffer.line_len(end)));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use pretty_assertions::assert_eq;

    fn tables() -> PatternTables {
        PatternTables::builtin().unwrap()
    }

    fn js(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(lines.iter().copied(), Language::JavaScript)
    }

    #[test]
    fn test_function_region_and_name() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = js(&["function add(a, b) {", "  return a + b;", "}"]);

        let region = resolver
            .find_function_at_position(&buffer, Position::new(0, 10))
            .unwrap();
        assert_eq!(region, Region::lines(0, 2, 1));

        let text = buffer.text(&region);
        assert_eq!(resolver.extract_function_name(&text, &buffer), Some("add".to_string()));
    }

    #[test]
    fn test_function_found_from_body_line() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = js(&[
            "const a = 1;",
            "function outer() {",
            "  function inner() {",
            "    return 1;",
            "  }",
            "  return inner();",
            "}",
        ]);

        assert_eq!(
            resolver.find_function_at_position(&buffer, Position::new(3, 4)),
            Some(Region::lines(2, 4, 3))
        );
        // Nearest opener above wins even after the inner function closed
        assert_eq!(
            resolver.find_function_at_position(&buffer, Position::new(5, 2)),
            Some(Region::lines(2, 4, 3))
        );
        assert_eq!(resolver.find_function_at_position(&buffer, Position::new(0, 0)), None);
    }

    #[test]
    fn test_unclosed_opener_falls_through_to_outer() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = js(&["function outer() {", "  x();", "}", "function broken() {", "  y();"]);

        assert_eq!(
            resolver.find_function_at_position(&buffer, Position::new(4, 0)),
            Some(Region::lines(0, 2, 1))
        );
    }

    #[test]
    fn test_python_function_region() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = TextBuffer::from_lines(
            ["def mul(x, y):", "    return x * y", "print(1)"],
            Language::Python,
        );
        assert_eq!(
            resolver.find_function_at_position(&buffer, Position::new(0, 5)),
            Some(Region::lines(0, 1, 16))
        );
    }

    #[test]
    fn test_variable_column_boundaries() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = js(&["const x = 5;"]);
        let expected = Region::new(Position::new(0, 0), Position::new(0, 9));

        assert_eq!(resolver.find_variable_at_position(&buffer, Position::new(0, 7)), Some(expected));
        assert_eq!(resolver.find_variable_at_position(&buffer, Position::new(0, 0)), Some(expected));
        assert_eq!(resolver.find_variable_at_position(&buffer, Position::new(0, 9)), Some(expected));
        assert_eq!(resolver.find_variable_at_position(&buffer, Position::new(0, 10)), None);
        assert_eq!(resolver.find_variable_at_position(&buffer, Position::new(0, 11)), None);
    }

    #[test]
    fn test_variable_columns_are_utf16() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = js(&["/*😀*/ let y = 2;"]);

        let region = resolver
            .find_variable_at_position(&buffer, Position::new(0, 8))
            .unwrap();
        assert_eq!(region.start, Position::new(0, 7));
        assert_eq!(region.end, Position::new(0, 14));
        assert_eq!(buffer.text(&region), "let y =");
    }

    #[test]
    fn test_class_region() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = TextBuffer::from_lines(
            [
                "public class Counter {",
                "    private int count;",
                "}",
            ],
            Language::Java,
        );
        assert_eq!(
            resolver.find_class_at_position(&buffer, Position::new(2, 0)),
            Some(Region::lines(0, 2, 1))
        );
    }

    #[test]
    fn test_context_precedence() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);

        // Inside a method of a class: function wins over class
        let buffer = js(&[
            "class Greeter {",
            "  greet() {",
            "    function hello() {",
            "      const msg = 'hi';",
            "    }",
            "  }",
            "}",
        ]);
        let context = resolver.get_context_at_position(&buffer, Position::new(3, 10));
        assert_eq!(context.kind, ContextKind::Function);
        assert_eq!(context.name.as_deref(), Some("hello"));
        assert_eq!(context.region, Region::lines(2, 4, 5));

        // Variable beats class
        let buffer = js(&["class Box {", "  const size = 3;", "}"]);
        let context = resolver.get_context_at_position(&buffer, Position::new(1, 8));
        assert_eq!(context.kind, ContextKind::Variable);
        assert_eq!(context.name.as_deref(), Some("size"));
        assert_eq!(context.text, "const size =");

        // Outside the declaration span the class is reported
        let context = resolver.get_context_at_position(&buffer, Position::new(1, 16));
        assert_eq!(context.kind, ContextKind::Class);
        assert_eq!(context.name.as_deref(), Some("Box"));
        assert_eq!(context.text, "class Box {\n  const size = 3;\n}");
    }

    #[test]
    fn test_context_import_comment_unknown() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = TextBuffer::from_lines(
            ["import os", "# helper", "print(os.name)"],
            Language::Python,
        );

        let import = resolver.get_context_at_position(&buffer, Position::new(0, 2));
        assert_eq!(import.kind, ContextKind::Import);
        assert_eq!(import.text, "import os");
        assert_eq!(import.region, Region::lines(0, 0, 9));
        assert_eq!(import.name, None);

        let comment = resolver.get_context_at_position(&buffer, Position::new(1, 0));
        assert_eq!(comment.kind, ContextKind::Comment);

        let unknown = resolver.get_context_at_position(&buffer, Position::new(2, 3));
        assert_eq!(unknown.kind, ContextKind::Unknown);
        assert_eq!(unknown.text, "print(os.name)");
        assert_eq!(unknown.region, Region::lines(2, 2, 14));
    }

    #[test]
    fn test_context_out_of_bounds_is_unknown() {
        let tables = tables();
        let resolver = RegionResolver::new(&tables);
        let buffer = js(&["let a = 1;"]);

        let context = resolver.get_context_at_position(&buffer, Position::new(7, 0));
        assert!(context.is_unknown());
        assert!(context.text.is_empty());
        assert!(context.region.is_empty());
        assert_eq!(resolver.find_function_at_position(&buffer, Position::new(7, 0)), None);
        assert_eq!(resolver.find_variable_at_position(&buffer, Position::new(7, 0)), None);
    }

    #[test]
    fn test_skip_literals_mode() {
        let tables = tables();
        let buffer = js(&["function f() {", "  return \"}\";", "}"]);

        let raw = RegionResolver::new(&tables);
        assert_eq!(
            raw.find_function_at_position(&buffer, Position::new(0, 0)),
            Some(Region::lines(0, 1, 13))
        );

        let config = ResolverConfig {
            boundary_mode: BoundaryMode::SkipLiterals,
            ..Default::default()
        };
        let skipping = RegionResolver::with_config(&tables, &config);
        assert_eq!(
            skipping.find_function_at_position(&buffer, Position::new(0, 0)),
            Some(Region::lines(0, 2, 1))
        );
    }
}
