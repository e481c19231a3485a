//! Classification of every known path into exactly one change category.
//!
//! The snapshot and the plan are outer-joined on path. Each joined row goes
//! through a single rule function, so the categories partition
//! `snapshot ∪ plan` by construction; [`classify`] still re-counts the result.

use crate::error::{IndexerError, Result};
use crate::plan::Plan;
use crate::record::FileRecord;
use crate::snapshot::Snapshot;
use std::collections::BTreeSet;
use std::fmt;

/// Change categories in priority order. The first rule that matches a path wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// On disk, not in the snapshot.
    New,
    /// In the snapshot, gone from disk.
    Deleted,
    /// A different importer now handles the file.
    DiffStrategy,
    /// Same importer at a higher version.
    NewerStrategy,
    /// File modified since the last update.
    Updated,
    Unchanged,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::Deleted,
        Self::DiffStrategy,
        Self::NewerStrategy,
        Self::Updated,
        Self::Unchanged,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new_files",
            Self::Deleted => "deleted_files",
            Self::DiffStrategy => "diff_strategy",
            Self::NewerStrategy => "newer_strategy",
            Self::Updated => "updated_files",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One joined row: the snapshot side and the plan side of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChange {
    pub path: String,
    pub old: Option<FileRecord>,
    pub new: Option<FileRecord>,
}

impl PathChange {
    /// True for snapshot records kept after their file disappeared.
    #[must_use]
    pub fn was_retained(&self) -> bool {
        self.old.as_ref().is_some_and(|old| old.retained)
    }
}

/// Six disjoint path sets, each in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub new_files: Vec<PathChange>,
    pub deleted_files: Vec<PathChange>,
    pub diff_strategy: Vec<PathChange>,
    pub newer_strategy: Vec<PathChange>,
    pub updated_files: Vec<PathChange>,
    pub unchanged: Vec<PathChange>,
}

impl Classification {
    #[must_use]
    pub fn get(&self, category: Category) -> &[PathChange] {
        match category {
            Category::New => &self.new_files,
            Category::Deleted => &self.deleted_files,
            Category::DiffStrategy => &self.diff_strategy,
            Category::NewerStrategy => &self.newer_strategy,
            Category::Updated => &self.updated_files,
            Category::Unchanged => &self.unchanged,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<PathChange> {
        match category {
            Category::New => &mut self.new_files,
            Category::Deleted => &mut self.deleted_files,
            Category::DiffStrategy => &mut self.diff_strategy,
            Category::NewerStrategy => &mut self.newer_strategy,
            Category::Updated => &mut self.updated_files,
            Category::Unchanged => &mut self.unchanged,
        }
    }

    /// Number of classified paths across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    /// Paths whose document must be re-extracted with the current importer.
    pub fn to_reimport(&self) -> impl Iterator<Item = &PathChange> {
        self.updated_files
            .iter()
            .chain(&self.diff_strategy)
            .chain(&self.newer_strategy)
    }

    /// Category of `path`, if it was classified.
    #[must_use]
    pub fn category_of(&self, path: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.get(*c).iter().any(|change| change.path == path))
    }
}

/// The membership rules, applied in [`Category`] order.
#[must_use]
pub fn categorize(old: Option<&FileRecord>, new: Option<&FileRecord>) -> Option<Category> {
    match (old, new) {
        (None, None) => None,
        (None, Some(_)) => Some(Category::New),
        (Some(_), None) => Some(Category::Deleted),
        (Some(old), Some(new)) => Some(if old.strategy_name != new.strategy_name {
            Category::DiffStrategy
        } else if new.strategy_version > old.strategy_version {
            Category::NewerStrategy
        } else if new.last_modified > old.last_modified {
            Category::Updated
        } else {
            Category::Unchanged
        }),
    }
}

pub fn classify(snapshot: &Snapshot, plan: &Plan) -> Result<Classification> {
    let old = snapshot.records();
    let new = plan.records();
    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    let mut classification = Classification::default();
    for key in &keys {
        let (old, new) = (old.get(*key), new.get(*key));
        let category = categorize(old, new).ok_or_else(|| {
            IndexerError::Inconsistent(format!("path '{key}' is in neither side"))
        })?;
        classification.get_mut(category).push(PathChange {
            path: (*key).clone(),
            old: old.cloned(),
            new: new.cloned(),
        });
    }

    let total = classification.total();
    if total != keys.len() {
        return Err(IndexerError::Inconsistent(format!(
            "{total} classified path(s) for {} known path(s)",
            keys.len()
        )));
    }

    log::debug!(
        "Classified {total} path(s): {}",
        Category::ALL
            .iter()
            .map(|c| format!("{c}={}", classification.get(*c).len()))
            .collect::<Vec<_>>()
            .join(" ")
    );

    Ok(classification)
}
