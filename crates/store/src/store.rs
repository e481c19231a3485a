use crate::document::{Document, SearchHit};
use crate::error::Result;

/// Keyed full-text document store with explicit commit.
///
/// Mutations (`insert`, `update`, `delete`) are buffered until [`commit`](Self::commit).
/// `exists` and `search` always observe the last committed state; pending mutations
/// stay invisible to them. [`rollback`](Self::rollback) discards everything buffered
/// since the last commit.
pub trait DocumentStore {
    /// Add `document` under its key, replacing any committed document with that key.
    fn insert(&mut self, document: Document) -> Result<String>;

    /// Replace the document stored under `key`.
    fn update(&mut self, key: &str, document: Document) -> Result<String>;

    fn delete(&mut self, key: &str) -> Result<String>;

    fn exists(&self, key: &str) -> Result<bool>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Ranked hits for whitespace-separated `terms`, best first, at most `limit`.
    fn search(&self, terms: &str, limit: usize) -> Result<Vec<SearchHit>>;
}
