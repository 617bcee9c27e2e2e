use crate::language::Language;
use crate::patterns::{PatternCategory, PatternTables};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall shape of a code snippet, used to pick a diagram or explanation style
///
/// Variants are declared in detection precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeShape {
    Function,
    Class,
    ControlFlow,
    Sequence,
    Generic,
}

impl CodeShape {
    /// Classify `text`
    ///
    /// The first line that opens a function or class decides between those
    /// two; otherwise branching/looping constructs, then asynchronous call
    /// chains, are looked for across the whole snippet.
    pub fn detect(tables: &PatternTables, text: &str, language: Language) -> Self {
        let functions = tables.patterns_for(language, PatternCategory::Function);
        let classes = tables.patterns_for(language, PatternCategory::Class);

        for line in text.lines() {
            if functions.iter().any(|p| p.is_match(line)) {
                return CodeShape::Function;
            }
            if classes.iter().any(|p| p.is_match(line)) {
                return CodeShape::Class;
            }
        }

        let structure = tables.structure_for(language);
        if structure.control_flow.iter().any(|p| p.is_match(text)) {
            CodeShape::ControlFlow
        } else if structure.sequence.iter().any(|p| p.is_match(text)) {
            CodeShape::Sequence
        } else {
            CodeShape::Generic
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CodeShape::Function => "function",
            CodeShape::Class => "class",
            CodeShape::ControlFlow => "control_flow",
            CodeShape::Sequence => "sequence",
            CodeShape::Generic => "generic",
        }
    }
}

impl fmt::Display for CodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str, language: Language) -> CodeShape {
        let tables = PatternTables::builtin().unwrap();
        CodeShape::detect(&tables, text, language)
    }

    #[test]
    fn test_function_and_class() {
        assert_eq!(
            detect("function f(a) {\n  if (a) { return 1; }\n}", Language::JavaScript),
            CodeShape::Function
        );
        assert_eq!(
            detect("class Stack:\n    def push(self, x):\n        pass", Language::Python),
            CodeShape::Class
        );
        assert_eq!(
            detect("public class Counter {\n  public int next() {\n    return 1;\n  }\n}", Language::Java),
            CodeShape::Class
        );
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(
            detect("for (let i = 0; i < n; i++) {\n  sum += i;\n}", Language::JavaScript),
            CodeShape::ControlFlow
        );
        assert_eq!(
            detect("if ready:\n    go()\nelse:\n    wait()", Language::Python),
            CodeShape::ControlFlow
        );
    }

    #[test]
    fn test_sequence_and_generic() {
        assert_eq!(
            detect("const data = await fetch(url);\nrender(data);", Language::TypeScript),
            CodeShape::Sequence
        );
        assert_eq!(
            detect("load().then(show).catch(fail);", Language::JavaScript),
            CodeShape::Sequence
        );
        assert_eq!(detect("x = 1\ny = x + 2", Language::Python), CodeShape::Generic);
    }

    #[test]
    fn test_serialized_name() {
        assert_eq!(
            serde_json::to_value(CodeShape::ControlFlow).unwrap(),
            serde_json::json!("control_flow")
        );
        assert_eq!(CodeShape::ControlFlow.to_string(), "control_flow");
    }
}
