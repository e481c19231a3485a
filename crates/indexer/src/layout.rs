use crate::error::{IndexerError, Result};
use std::path::{Path, PathBuf};

/// Name of the state directory kept at the index root. Never scanned.
pub const STATE_DIR: &str = ".siftindex";

const SNAPSHOT_FILE_NAME: &str = "metadata.csv";
const STORE_DIR_NAME: &str = "index";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Paths of everything sift keeps under an index root.
///
/// ```text
/// <root>/.siftindex/
///     metadata.csv   snapshot of synchronized files
///     index/         document store
///     config.toml    optional settings
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLayout {
    root: PathBuf,
}

impl IndexLayout {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.is_dir() {
            return Err(IndexerError::InvalidPath(format!(
                "Not a directory: {}",
                root.display()
            )));
        }

        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.state_dir().join(SNAPSHOT_FILE_NAME)
    }

    #[must_use]
    pub fn store_dir(&self) -> PathBuf {
        self.state_dir().join(STORE_DIR_NAME)
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.state_dir().join(CONFIG_FILE_NAME)
    }

    /// Path relative to the root with `/` separators. This is the key used in the
    /// snapshot and the document store.
    ///
    /// `None` when the relative path is not valid UTF-8; such a key could not be
    /// mapped back to the file by [`absolute`](Self::absolute).
    #[must_use]
    pub fn relative_key(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let normalized = relative.to_str()?;
        if normalized.contains('\\') {
            return Some(normalized.replace('\\', "/"));
        }
        Some(normalized.to_string())
    }

    /// Inverse of [`relative_key`](Self::relative_key).
    #[must_use]
    pub fn absolute(&self, key: &str) -> PathBuf {
        key.split('/')
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}
