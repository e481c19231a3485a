use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Index error: {0}")]
    IndexError(#[from] tantivy::TantivyError),

    #[error("Failed to open index directory: {0}")]
    OpenDirectory(#[from] tantivy::directory::error::OpenDirectoryError),

    #[error("Index schema mismatch: missing field '{0}'")]
    SchemaMismatch(&'static str),
}
