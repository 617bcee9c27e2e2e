use crate::patterns::PatternCategory;
use crate::position::Region;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntactic kind of the code under a position
///
/// Variants are declared in classification precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Function,
    Variable,
    Class,
    Import,
    Comment,
    Unknown,
}

impl ContextKind {
    /// All kinds, highest precedence first
    pub const PRECEDENCE: [ContextKind; 6] = [
        ContextKind::Function,
        ContextKind::Variable,
        ContextKind::Class,
        ContextKind::Import,
        ContextKind::Comment,
        ContextKind::Unknown,
    ];

    /// Pattern category that recognises this kind
    #[must_use]
    pub const fn category(self) -> Option<PatternCategory> {
        match self {
            Self::Function => Some(PatternCategory::Function),
            Self::Variable => Some(PatternCategory::Variable),
            Self::Class => Some(PatternCategory::Class),
            Self::Import => Some(PatternCategory::Import),
            Self::Comment => Some(PatternCategory::Comment),
            Self::Unknown => None,
        }
    }

    /// Whether the kind spans a block found by the boundary scan
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Function | Self::Class)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Class => "class",
            Self::Import => "import",
            Self::Comment => "comment",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A region tagged with its syntactic kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContext {
    pub kind: ContextKind,

    /// Text covered by `region`
    pub text: String,

    pub region: Region,

    /// Identifier, when one could be extracted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CodeContext {
    #[must_use]
    pub const fn new(kind: ContextKind, text: String, region: Region) -> Self {
        Self {
            kind,
            text,
            region,
            name: None,
        }
    }

    /// Builder: set name
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Whether nothing more specific than the raw line was found
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self.kind, ContextKind::Unknown)
    }
}
