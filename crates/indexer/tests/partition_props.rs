//! Property-based tests for change classification.
//!
//! Snapshots and plans are drawn from one small path alphabet so most runs mix
//! new, deleted and shared paths.

use proptest::prelude::*;
use sift_indexer::{classify, Category, FileRecord, Plan, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

const PATHS: [&str; 6] = ["a.txt", "b.md", "c/d.txt", "c/e.pdf", "f.txt", "g/h/i.md"];

#[derive(Debug, Clone)]
struct Fields {
    last_modified: i64,
    strategy_name: &'static str,
    strategy_version: u32,
}

fn fields_strategy() -> impl Strategy<Value = Fields> {
    (0i64..4, prop::sample::select(vec!["text", "pandoc"]), 0u32..3).prop_map(
        |(last_modified, strategy_name, strategy_version)| Fields {
            last_modified,
            strategy_name,
            strategy_version,
        },
    )
}

fn side_strategy() -> impl Strategy<Value = BTreeMap<&'static str, Fields>> {
    prop::collection::btree_map(
        prop::sample::select(PATHS.to_vec()),
        fields_strategy(),
        0..=PATHS.len(),
    )
}

fn record(path: &str, fields: &Fields) -> FileRecord {
    FileRecord::new(
        path,
        fields.last_modified,
        "txt",
        fields.strategy_name,
        fields.strategy_version,
    )
}

/// Category the rules assign, written out independently of the classifier.
fn expected(old: Option<&Fields>, new: Option<&Fields>) -> Category {
    match (old, new) {
        (None, _) => Category::New,
        (_, None) => Category::Deleted,
        (Some(old), Some(new)) if old.strategy_name != new.strategy_name => Category::DiffStrategy,
        (Some(old), Some(new)) if new.strategy_version > old.strategy_version => {
            Category::NewerStrategy
        }
        (Some(old), Some(new)) if new.last_modified > old.last_modified => Category::Updated,
        _ => Category::Unchanged,
    }
}

proptest! {
    /// Property: every known path is classified exactly once.
    #[test]
    fn categories_partition_known_paths(old in side_strategy(), new in side_strategy()) {
        let snapshot = Snapshot::from_records(old.iter().map(|(p, f)| record(p, f))).unwrap();
        let plan: Plan = new.iter().map(|(p, f)| record(p, f)).collect();

        let classification = classify(&snapshot, &plan).unwrap();

        let known: BTreeSet<&str> = old.keys().chain(new.keys()).copied().collect();
        prop_assert_eq!(classification.total(), known.len());

        let mut seen = BTreeSet::new();
        for category in Category::ALL {
            for change in classification.get(category) {
                prop_assert!(seen.insert(change.path.clone()), "{} classified twice", change.path);
                prop_assert!(known.contains(change.path.as_str()));
            }
        }
        prop_assert_eq!(seen.len(), known.len());
    }

    /// Property: each path lands in the first category whose rule matches.
    #[test]
    fn categories_follow_priority_order(old in side_strategy(), new in side_strategy()) {
        let snapshot = Snapshot::from_records(old.iter().map(|(p, f)| record(p, f))).unwrap();
        let plan: Plan = new.iter().map(|(p, f)| record(p, f)).collect();

        let classification = classify(&snapshot, &plan).unwrap();

        for path in old.keys().chain(new.keys()) {
            let want = expected(old.get(path), new.get(path));
            prop_assert_eq!(classification.category_of(path), Some(want), "path {}", path);
        }
    }

    /// Property: a plan compared against its own snapshot has nothing pending.
    #[test]
    fn identical_sides_are_unchanged(side in side_strategy()) {
        let snapshot = Snapshot::from_records(side.iter().map(|(p, f)| record(p, f))).unwrap();
        let plan: Plan = side.iter().map(|(p, f)| record(p, f)).collect();

        let classification = classify(&snapshot, &plan).unwrap();

        prop_assert_eq!(classification.unchanged.len(), side.len());
        prop_assert_eq!(classification.total(), side.len());
    }
}
