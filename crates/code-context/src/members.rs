use crate::language::Language;
use crate::patterns::PatternTables;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading words that mark a statement rather than a member declaration
const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "elif", "for", "while", "do", "switch", "case", "default", "catch", "try",
    "return", "throw", "raise", "new", "await", "yield", "with", "super", "delete", "typeof",
];

/// Methods and properties declared inside a class region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMembers {
    pub methods: Vec<String>,
    pub properties: Vec<String>,
}

impl ClassMembers {
    /// Scan `text` line by line for member declarations
    ///
    /// Names are reported once, in order of first appearance. Assignments
    /// inside method bodies can be reported as properties.
    pub fn extract(tables: &PatternTables, text: &str, language: Language) -> Self {
        let structure = tables.structure_for(language);
        let mut members = Self::default();

        for line in text.lines().skip(1) {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_statement(trimmed) {
                continue;
            }

            if let Some(name) = first_capture(&structure.method, trimmed) {
                push_unique(&mut members.methods, name);
            } else if let Some(name) = first_capture(&structure.property, trimmed) {
                push_unique(&mut members.properties, name);
            }
        }

        members
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.properties.is_empty()
    }
}

fn is_statement(line: &str) -> bool {
    let first_word = line
        .split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .next()
        .unwrap_or_default();
    STATEMENT_KEYWORDS.contains(&first_word)
}

fn first_capture<'t>(patterns: &[Regex], line: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(line)?.get(1))
        .map(|m| m.as_str())
        .filter(|name| !STATEMENT_KEYWORDS.contains(name))
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|existing| existing == name) {
        names.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str, language: Language) -> ClassMembers {
        let tables = PatternTables::builtin().unwrap();
        ClassMembers::extract(&tables, text, language)
    }

    #[test]
    fn test_javascript_class() {
        let members = extract(
            "class Counter {\n  static step = 1;\n  constructor(start) {\n    this.value = start;\n  }\n  increment() {\n    if (this.value > 10) {\n      return;\n    }\n    this.value = this.value + 1;\n  }\n}",
            Language::JavaScript,
        );
        assert_eq!(members.methods, vec!["constructor", "increment"]);
        assert_eq!(members.properties, vec!["step", "value"]);
    }

    #[test]
    fn test_typescript_class() {
        let members = extract(
            "export class User {\n  private name: string;\n  readonly id?: number;\n  public greet(): string {\n    return this.name;\n  }\n}",
            Language::TypeScript,
        );
        assert_eq!(members.methods, vec!["greet"]);
        assert_eq!(members.properties, vec!["name", "id"]);
    }

    #[test]
    fn test_python_class() {
        let members = extract(
            "class Point:\n    def __init__(self, x, y):\n        self.x = x\n        self.y: int = y\n\n    async def dist(self):\n        if self.x == 0:\n            return 0\n",
            Language::Python,
        );
        assert_eq!(members.methods, vec!["__init__", "dist"]);
        assert_eq!(members.properties, vec!["x", "y"]);
    }

    #[test]
    fn test_java_class() {
        let members = extract(
            "public class Account {\n    private final String owner;\n    private int balance = 0;\n    public void deposit(int amount) {\n        balance += amount;\n        return;\n    }\n}",
            Language::Java,
        );
        assert_eq!(members.methods, vec!["deposit"]);
        assert_eq!(members.properties, vec!["owner", "balance"]);
    }

    #[test]
    fn test_empty_class() {
        let members = extract("class Empty {}", Language::JavaScript);
        assert!(members.is_empty());
    }
}
