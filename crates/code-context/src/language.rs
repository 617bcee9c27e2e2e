use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Language of the buffer being resolved
///
/// The mapping from editor language ids is total: anything unrecognised is
/// `Unknown`, which borrows the JavaScript pattern set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    #[default]
    Unknown,
}

/// How a language delimits the body of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// `{ ... }` bodies, closed by a matching brace
    Braces,
    /// Bodies introduced by `:` and closed by a dedent
    Indentation,
}

impl Language {
    /// Map an editor language id (`"javascript"`, `"python"`, ...) to a language
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "javascript" | "js" | "javascriptreact" | "jsx" => Language::JavaScript,
            "typescript" | "ts" | "typescriptreact" | "tsx" => Language::TypeScript,
            "python" | "py" => Language::Python,
            "java" => Language::Java,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "py" | "pyw" | "pyi" => Language::Python,
            "java" => Language::Java,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language id as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Unknown => "unknown",
        }
    }

    /// The language whose pattern tables serve this one
    pub const fn pattern_source(self) -> Self {
        match self {
            Language::Unknown => Language::JavaScript,
            other => other,
        }
    }

    /// How blocks are delimited in this language
    pub const fn block_style(self) -> BlockStyle {
        match self.pattern_source() {
            Language::Python => BlockStyle::Indentation,
            _ => BlockStyle::Braces,
        }
    }

    /// Languages that carry their own pattern tables
    pub const fn registered() -> &'static [Language] {
        &[
            Language::JavaScript,
            Language::TypeScript,
            Language::Python,
            Language::Java,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
