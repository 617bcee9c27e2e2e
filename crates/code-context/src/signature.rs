use crate::language::Language;
use crate::names::extract_function_name;
use crate::patterns::PatternTables;
use serde::{Deserialize, Serialize};

/// Name, parameters and return type read off a function's opener
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parameter names with type annotations, defaults and rest markers removed
    pub parameters: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

impl FunctionSignature {
    /// Extract the signature of the first function opener in `text`
    ///
    /// Parameter lists are split on commas, so generic types and
    /// destructuring patterns containing commas come out fragmented.
    pub fn extract(tables: &PatternTables, text: &str, language: Language) -> Self {
        let structure = tables.structure_for(language);

        let parameters = structure
            .parameters
            .iter()
            .find_map(|pattern| pattern.captures(text)?.get(1))
            .map(|list| {
                list.as_str()
                    .split(',')
                    .filter_map(|raw| parameter_name(raw, language))
                    .collect()
            })
            .unwrap_or_default();

        let return_type = structure
            .return_type
            .iter()
            .find_map(|pattern| pattern.captures(text)?.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|ty| !ty.is_empty());

        Self {
            name: extract_function_name(tables, text, language),
            parameters,
            return_type,
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

fn parameter_name(raw: &str, language: Language) -> Option<String> {
    let without_default = raw.split('=').next().unwrap_or(raw);
    let declaration = match language.pattern_source() {
        // `final Type name`, `Type... name`
        Language::Java => without_default.split_whitespace().last(),
        // `name: Type`, `public name?: Type`, `*args`, `...rest`
        _ => without_default
            .split(':')
            .next()
            .and_then(|head| head.split_whitespace().last()),
    }?;

    let name = declaration
        .trim_start_matches("...")
        .trim_start_matches('*')
        .trim_end_matches(['?', '!']);
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str, language: Language) -> FunctionSignature {
        let tables = PatternTables::builtin().unwrap();
        FunctionSignature::extract(&tables, text, language)
    }

    #[test]
    fn test_javascript_function() {
        let sig = extract("function add(a, b = 2, ...rest) {\n  return a + b;\n}", Language::JavaScript);
        assert_eq!(sig.name.as_deref(), Some("add"));
        assert_eq!(sig.parameters, vec!["a", "b", "rest"]);
        assert_eq!(sig.return_type, None);
        assert_eq!(sig.arity(), 3);
    }

    #[test]
    fn test_arrow_function() {
        let sig = extract("const twice = (x) => {\n  return x * 2;\n};", Language::JavaScript);
        assert_eq!(sig.name.as_deref(), Some("twice"));
        assert_eq!(sig.parameters, vec!["x"]);
    }

    #[test]
    fn test_typescript_types_are_stripped() {
        let sig = extract(
            "function greet(name: string, times?: number): string {\n  return name;\n}",
            Language::TypeScript,
        );
        assert_eq!(sig.parameters, vec!["name", "times"]);
        assert_eq!(sig.return_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_python_signature() {
        let sig = extract(
            "def scale(self, factor: float = 1.0, *args, **kwargs) -> list[int]:\n    pass",
            Language::Python,
        );
        assert_eq!(sig.name.as_deref(), Some("scale"));
        assert_eq!(sig.parameters, vec!["self", "factor", "args", "kwargs"]);
        assert_eq!(sig.return_type.as_deref(), Some("list[int]"));
    }

    #[test]
    fn test_java_signature() {
        let sig = extract(
            "public static int sum(final int a, int b) {\n  return a + b;\n}",
            Language::Java,
        );
        assert_eq!(sig.name.as_deref(), Some("sum"));
        assert_eq!(sig.parameters, vec!["a", "b"]);
        assert_eq!(sig.return_type.as_deref(), Some("int"));
    }

    #[test]
    fn test_no_parameters() {
        let sig = extract("def run():\n    pass", Language::Python);
        assert!(sig.parameters.is_empty());
        assert_eq!(sig.return_type, None);

        let none = extract("x = 1", Language::Python);
        assert_eq!(none, FunctionSignature::default());
    }
}
