//! # Sift Store
//!
//! Keyed full-text document storage backed by tantivy.
//!
//! Documents are identified by their path relative to the index root. Writes are
//! buffered until [`DocumentStore::commit`]; readers only observe committed state.
//!
//! ## Example
//!
//! ```no_run
//! use sift_store::{Document, DocumentStore, TantivyStore};
//!
//! fn main() -> sift_store::Result<()> {
//!     let mut store = TantivyStore::open(".siftindex/index")?;
//!     store.insert(Document::new("notes/todo.txt", 0, "buy milk"))?;
//!     store.commit()?;
//!
//!     for hit in store.search("milk", 5)? {
//!         println!("{}", sift_store::format_hit(&hit));
//!     }
//!     Ok(())
//! }
//! ```

mod document;
mod error;
mod store;
mod tantivy_store;

pub use document::{format_hit, Document, SearchHit};
pub use error::{Result, StoreError};
pub use store::DocumentStore;
pub use tantivy_store::{TantivyStore, DEFAULT_EXCERPT_CHARS};
