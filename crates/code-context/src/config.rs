use crate::error::{ContextError, Result};
use crate::language::Language;
use crate::patterns::PatternCategory;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for region resolution
///
/// ```toml
/// boundary_mode = "skip_literals"
/// default_language = "python"
///
/// [patterns.javascript]
/// function = ['^\s*\w+\s*\([^)]*\)\s*\{']
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// How the boundary scan treats braces inside literals and comments
    pub boundary_mode: BoundaryMode,

    /// Language used when neither the caller nor the file name determines one
    pub default_language: Option<String>,

    /// Extra patterns per language id, appended after the built-in ones
    pub patterns: BTreeMap<String, ExtraPatterns>,
}

/// Additional opener patterns for one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtraPatterns {
    pub function: Vec<String>,
    pub variable: Vec<String>,
    pub class: Vec<String>,
    pub import: Vec<String>,
    pub comment: Vec<String>,
}

impl ExtraPatterns {
    /// Patterns configured for a category
    pub fn for_category(&self, category: PatternCategory) -> &[String] {
        match category {
            PatternCategory::Function => &self.function,
            PatternCategory::Variable => &self.variable,
            PatternCategory::Class => &self.class,
            PatternCategory::Import => &self.import,
            PatternCategory::Comment => &self.comment,
        }
    }
}

/// Brace counting mode for the boundary scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Count every brace character, including those inside strings and comments
    #[default]
    Raw,

    /// Ignore braces inside string literals and comments
    SkipLiterals,
}

impl ResolverConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading resolver config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Configured fallback language, if any
    pub fn default_language(&self) -> Option<Language> {
        self.default_language.as_deref().map(Language::from_id)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.default_language {
            if Language::from_id(id) == Language::Unknown {
                return Err(ContextError::invalid_config(format!(
                    "default_language '{id}' is not a supported language"
                )));
            }
        }

        for (id, extra) in &self.patterns {
            if Language::from_id(id) == Language::Unknown {
                return Err(ContextError::invalid_config(format!(
                    "patterns.{id}: unsupported language"
                )));
            }
            for category in PatternCategory::ALL {
                for pattern in extra.for_category(category) {
                    Regex::new(pattern).map_err(|source| {
                        ContextError::invalid_pattern(id.as_str(), category.as_str(), source)
                    })?;
                }
            }
        }

        Ok(())
    }
}
