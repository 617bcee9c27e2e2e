use anyhow::{Context as AnyhowContext, Result};
use knowcode_context::{Language, ResolverConfig};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Path argument that reads standard input
pub(crate) const STDIN_PATH: &str = "-";

pub(crate) fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read source from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<ResolverConfig> {
    match path {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ResolverConfig::default()),
    }
}

/// Pick the buffer language: explicit flag, then file extension, then the
/// configured default
pub(crate) fn resolve_language(
    flag: Option<&str>,
    path: &Path,
    config: &ResolverConfig,
) -> Language {
    if let Some(id) = flag {
        let language = Language::from_id(id);
        if language == Language::Unknown && !id.eq_ignore_ascii_case("unknown") {
            log::warn!("unsupported language '{id}', using javascript patterns");
        }
        return language;
    }

    if !is_stdin(path) {
        let detected = Language::from_path(path);
        if detected != Language::Unknown {
            return detected;
        }
    }

    config.default_language().unwrap_or(Language::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_extension() {
        let config = ResolverConfig::default();
        assert_eq!(
            resolve_language(Some("py"), Path::new("main.js"), &config),
            Language::Python
        );
        assert_eq!(
            resolve_language(None, Path::new("main.js"), &config),
            Language::JavaScript
        );
    }

    #[test]
    fn configured_default_applies_to_stdin_and_unknown_extensions() {
        let config = ResolverConfig::from_toml_str("default_language = \"java\"").unwrap();
        assert_eq!(resolve_language(None, Path::new("-"), &config), Language::Java);
        assert_eq!(resolve_language(None, Path::new("notes.txt"), &config), Language::Java);
        assert_eq!(
            resolve_language(None, Path::new("-"), &ResolverConfig::default()),
            Language::Unknown
        );
    }
}
