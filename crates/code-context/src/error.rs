use thiserror::Error;

/// Result type for resolver construction and configuration
pub type Result<T> = std::result::Result<T, ContextError>;

/// Errors raised while building pattern tables or loading configuration.
///
/// Lookups themselves never fail: a position that matches nothing resolves
/// to `None` or to an `Unknown` context.
#[derive(Error, Debug)]
pub enum ContextError {
    /// A configured pattern is not a valid regular expression
    #[error("Invalid pattern for {language}.{category}: {source}")]
    InvalidPattern {
        language: String,
        category: String,
        #[source]
        source: regex::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ContextError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(
        language: impl Into<String>,
        category: impl Into<String>,
        source: regex::Error,
    ) -> Self {
        Self::InvalidPattern {
            language: language.into(),
            category: category.into(),
            source,
        }
    }
}
