use serde::{Deserialize, Serialize};

/// Extraction-relevant state of one file at a point in time.
///
/// Column order matches the snapshot file header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    /// Unix milliseconds.
    pub last_modified: i64,
    pub extension: String,
    pub strategy_name: String,
    pub strategy_version: u32,
    /// Set when the file is gone from disk but its document was kept in the store.
    #[serde(default)]
    pub retained: bool,
}

impl FileRecord {
    pub fn new(
        path: impl Into<String>,
        last_modified: i64,
        extension: impl Into<String>,
        strategy_name: impl Into<String>,
        strategy_version: u32,
    ) -> Self {
        Self {
            path: path.into(),
            last_modified,
            extension: extension.into(),
            strategy_name: strategy_name.into(),
            strategy_version,
            retained: false,
        }
    }

    #[must_use]
    pub fn into_retained(self) -> Self {
        Self {
            retained: true,
            ..self
        }
    }
}
