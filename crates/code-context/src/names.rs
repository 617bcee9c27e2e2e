//! Best-effort identifier extraction from an already-resolved region.
//!
//! Destructured, computed and decorated names are not resolved.

use crate::language::Language;
use crate::patterns::{PatternCategory, PatternTables};

/// Name of the function declared in `text`
pub fn extract_function_name(tables: &PatternTables, text: &str, language: Language) -> Option<String> {
    extract_name(tables, text, language, PatternCategory::Function)
}

/// Name of the variable declared in `text`
pub fn extract_variable_name(tables: &PatternTables, text: &str, language: Language) -> Option<String> {
    extract_name(tables, text, language, PatternCategory::Variable)
}

/// Name of the class declared in `text`
pub fn extract_class_name(tables: &PatternTables, text: &str, language: Language) -> Option<String> {
    extract_name(tables, text, language, PatternCategory::Class)
}

fn extract_name(
    tables: &PatternTables,
    text: &str,
    language: Language,
    category: PatternCategory,
) -> Option<String> {
    tables
        .name_patterns_for(language, category)
        .iter()
        .find_map(|pattern| pattern.captures(text)?.get(1))
        .map(|m| m.as_str().to_string())
}
