use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} is not available: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed on {path} ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("no importer registered for extension '{0}'")]
    UnsupportedExtension(String),
}
