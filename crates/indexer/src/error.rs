use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Scan failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Import failed: {0}")]
    ImportError(#[from] sift_importers::ImportError),

    #[error("Document store error: {0}")]
    StoreError(#[from] sift_store::StoreError),

    #[error("Invalid index root: {0}")]
    InvalidPath(String),

    #[error("No index found at {}; run `sift init` first", .0.display())]
    NotInitialized(PathBuf),

    #[error("An index already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Inconsistent classification: {0}")]
    Inconsistent(String),
}
