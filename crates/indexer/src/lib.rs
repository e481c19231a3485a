//! # Sift Indexer
//!
//! Incremental reconciliation between a directory tree and a full-text index.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> FileScanner (one pass per registered extension)
//!     │      └─> PlanBuilder ──> Plan
//!     │
//!     ├──> Snapshot (.siftindex/metadata.csv)
//!     │
//!     ├──> classify(Snapshot, Plan) ──> Classification
//!     │      └─> format_status (pending work, for humans)
//!     │
//!     └──> UpdateDriver
//!            ├─> DocumentStore: delete / insert / update, one commit
//!            └─> new Snapshot (atomic rewrite)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sift_indexer::{DeletionPolicy, SiftIndexer};
//! use sift_store::TantivyStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let indexer = SiftIndexer::new("/path/to/notes")?;
//!     if !indexer.is_initialized() {
//!         indexer.init().await?;
//!     }
//!
//!     let mut store = TantivyStore::open(indexer.layout().store_dir())?;
//!     if let Some(report) = indexer.update(&mut store, DeletionPolicy::SoftRetain).await? {
//!         println!("{}", report.summary());
//!     }
//!     Ok(())
//! }
//! ```

mod differ;
mod driver;
mod engine;
mod error;
mod layout;
mod plan;
mod record;
mod scanner;
pub mod snapshot;
mod status;

pub use differ::{categorize, classify, Category, Classification, PathChange};
pub use driver::{DeletionPolicy, UpdateAction, UpdateDriver, UpdateReport};
pub use engine::SiftIndexer;
pub use error::{IndexerError, Result};
pub use layout::{IndexLayout, STATE_DIR};
pub use plan::{Plan, PlanBuilder};
pub use record::FileRecord;
pub use scanner::{FileScanner, ScannedFile};
pub use snapshot::Snapshot;
pub use status::{format_status, has_pending_work};
