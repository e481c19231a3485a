//! Per-index settings read from `.siftindex/config.toml`.
//!
//! ```toml
//! ignore = ["drafts", "node_modules"]
//! query_limit = 10
//! excerpt_max_chars = 200
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_QUERY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiftConfig {
    /// Path components skipped while scanning, on top of the state directory.
    pub ignore: Vec<String>,
    /// Hits shown by `query` when `--limit` is not given.
    pub query_limit: usize,
    pub excerpt_max_chars: usize,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            query_limit: DEFAULT_QUERY_LIMIT,
            excerpt_max_chars: sift_store::DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl SiftConfig {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(SiftConfig::parse("").unwrap(), SiftConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = SiftConfig::parse("ignore = [\"drafts\"]\nquery_limit = 12\n").unwrap();
        assert_eq!(config.ignore, vec!["drafts".to_string()]);
        assert_eq!(config.query_limit, 12);
        assert_eq!(config.excerpt_max_chars, 150);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(SiftConfig::parse("qurey_limit = 3").is_err());
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = SiftConfig::load(&tmp.path().join("config.toml")).await.unwrap();
        assert_eq!(config, SiftConfig::default());
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "query_limit = \"many\"").unwrap();

        let err = SiftConfig::load(&path).await.unwrap_err();
        assert!(format!("{err:#}").contains("Invalid config file"));
    }
}
