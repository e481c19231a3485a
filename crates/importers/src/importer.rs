use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// A named, versioned strategy that turns a file into indexable plain text.
///
/// `name` and `version` are persisted next to every indexed file. Renaming an
/// importer or bumping its version makes every file it handles eligible for
/// re-extraction on the next update.
#[async_trait]
pub trait Importer: Send + Sync {
    /// Stable strategy name recorded in the snapshot.
    fn name(&self) -> &str;

    /// Strategy version; bump it whenever the produced text changes.
    fn version(&self) -> u32;

    /// Extract the text content of `path`.
    async fn run(&self, path: &Path) -> Result<String>;
}
