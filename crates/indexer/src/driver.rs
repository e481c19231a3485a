use crate::differ::{Category, Classification, PathChange};
use crate::error::{IndexerError, Result};
use crate::layout::IndexLayout;
use crate::record::FileRecord;
use crate::snapshot::{self, Snapshot};
use sift_importers::ImporterRegistry;
use sift_store::{Document, DocumentStore};
use std::fmt;
use std::time::Instant;

/// What happens to documents of files that disappeared from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletionPolicy {
    /// Delete the document and forget the file.
    HardDelete,
    /// Keep the document and keep the file in the snapshot, marked retained.
    #[default]
    SoftRetain,
}

impl DeletionPolicy {
    #[must_use]
    pub const fn from_delete_missing(delete_missing: bool) -> Self {
        if delete_missing {
            Self::HardDelete
        } else {
            Self::SoftRetain
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    Insert(String),
    Update(String),
    Delete(String),
    Retain(String),
}

impl UpdateAction {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Insert(p) | Self::Update(p) | Self::Delete(p) | Self::Retain(p) => p,
        }
    }
}

impl fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Retain(_) => "retain",
        };
        write!(f, "{verb} {}", self.path())
    }
}

/// Outcome of one completed update cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Applied actions in execution order.
    pub actions: Vec<UpdateAction>,
    /// Records in the snapshot written at the end of the cycle.
    pub snapshot_len: usize,
    pub duration_ms: u64,
}

impl UpdateReport {
    fn count(&self, pred: fn(&UpdateAction) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }

    #[must_use]
    pub fn inserted(&self) -> usize {
        self.count(|a| matches!(a, UpdateAction::Insert(_)))
    }

    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|a| matches!(a, UpdateAction::Update(_)))
    }

    #[must_use]
    pub fn deleted(&self) -> usize {
        self.count(|a| matches!(a, UpdateAction::Delete(_)))
    }

    #[must_use]
    pub fn retained(&self) -> usize {
        self.count(|a| matches!(a, UpdateAction::Retain(_)))
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} inserted, {} updated, {} deleted, {} retained; {} file(s) indexed",
            self.inserted(),
            self.updated(),
            self.deleted(),
            self.retained(),
            self.snapshot_len
        )
    }
}

/// Applies a [`Classification`] to a document store and persists the resulting
/// snapshot.
///
/// Order: deletions (hard-delete only), inserts, re-imports, a single commit, then
/// the snapshot rewrite. Any failure before the commit rolls the store back and
/// leaves the previous snapshot in place.
pub struct UpdateDriver<'a, S: DocumentStore + ?Sized> {
    layout: &'a IndexLayout,
    registry: &'a ImporterRegistry,
    store: &'a mut S,
    policy: DeletionPolicy,
}

impl<'a, S: DocumentStore + ?Sized> UpdateDriver<'a, S> {
    pub fn new(
        layout: &'a IndexLayout,
        registry: &'a ImporterRegistry,
        store: &'a mut S,
        policy: DeletionPolicy,
    ) -> Self {
        Self {
            layout,
            registry,
            store,
            policy,
        }
    }

    pub async fn run(mut self, classification: &Classification) -> Result<UpdateReport> {
        let start = Instant::now();
        // Internal failures must surface before anything reaches the store.
        let new_snapshot = self.next_snapshot(classification)?;

        let mut actions = match self.apply(classification).await {
            Ok(actions) => actions,
            Err(err) => {
                self.rollback();
                return Err(err);
            }
        };
        if let Err(err) = self.store.commit() {
            self.rollback();
            return Err(err.into());
        }

        snapshot::save(self.layout, &new_snapshot).await?;

        if self.policy == DeletionPolicy::SoftRetain {
            actions.extend(
                classification
                    .deleted_files
                    .iter()
                    .filter(|change| !change.was_retained())
                    .map(|change| UpdateAction::Retain(change.path.clone())),
            );
        }

        let report = UpdateReport {
            actions,
            snapshot_len: new_snapshot.len(),
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        log::info!("Update complete in {}ms: {}", report.duration_ms, report.summary());
        Ok(report)
    }

    async fn apply(&mut self, classification: &Classification) -> Result<Vec<UpdateAction>> {
        let mut actions = Vec::new();

        if self.policy == DeletionPolicy::HardDelete {
            for change in &classification.deleted_files {
                self.store.delete(&change.path)?;
                actions.push(UpdateAction::Delete(change.path.clone()));
            }
        }

        for change in &classification.new_files {
            let document = self.extract(change).await?;
            self.store.insert(document)?;
            actions.push(UpdateAction::Insert(change.path.clone()));
        }

        for change in classification.to_reimport() {
            let document = self.extract(change).await?;
            self.store.update(&change.path, document)?;
            actions.push(UpdateAction::Update(change.path.clone()));
        }

        Ok(actions)
    }

    async fn extract(&self, change: &PathChange) -> Result<Document> {
        let record = planned(change)?;
        let importer = self.registry.require(&record.extension)?;
        let path = self.layout.absolute(&record.path);

        log::debug!("Extracting {} with {}", record.path, importer.name());
        let body = importer.run(&path).await?;
        Ok(Document::new(record.path.clone(), record.last_modified, body))
    }

    fn next_snapshot(&self, classification: &Classification) -> Result<Snapshot> {
        let kept = [
            Category::New,
            Category::Updated,
            Category::DiffStrategy,
            Category::NewerStrategy,
            Category::Unchanged,
        ];

        let mut records = Vec::with_capacity(classification.total());
        for category in kept {
            for change in classification.get(category) {
                records.push(FileRecord {
                    retained: false,
                    ..planned(change)?.clone()
                });
            }
        }

        if self.policy == DeletionPolicy::SoftRetain {
            for change in &classification.deleted_files {
                let old = change.old.clone().ok_or_else(|| {
                    IndexerError::Inconsistent(format!(
                        "deleted path '{}' has no snapshot record",
                        change.path
                    ))
                })?;
                records.push(old.into_retained());
            }
        }

        Snapshot::from_records(records)
    }

    fn rollback(&mut self) {
        if let Err(err) = self.store.rollback() {
            log::warn!("Failed to roll back pending store changes: {err}");
        }
    }
}

fn planned(change: &PathChange) -> Result<&FileRecord> {
    change.new.as_ref().ok_or_else(|| {
        IndexerError::Inconsistent(format!("path '{}' has no plan record", change.path))
    })
}
