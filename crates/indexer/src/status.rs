use crate::differ::{Category, Classification, PathChange};
use crate::driver::DeletionPolicy;

/// Displayed categories, in output order.
const SECTIONS: [(Category, &str); 5] = [
    (Category::New, "New"),
    (Category::Deleted, "Deleted"),
    (Category::Updated, "Updated"),
    (Category::DiffStrategy, "New importer available"),
    (Category::NewerStrategy, "Updated importer available"),
];

/// Human-readable summary of pending work, or an empty string when there is none.
///
/// ```text
/// New:
/// notes/a.txt
/// Deleted:
/// old.txt
/// ```
///
/// Deleted paths that were already retained by an earlier update are not repeated.
#[must_use]
pub fn format_status(classification: &Classification) -> String {
    SECTIONS
        .iter()
        .filter_map(|(category, header)| {
            let paths: Vec<&str> = classification
                .get(*category)
                .iter()
                .filter(|change| announce(*category, change))
                .map(|change| change.path.as_str())
                .collect();
            if paths.is_empty() {
                None
            } else {
                Some(format!("{header}:\n{}", paths.join("\n")))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn announce(category: Category, change: &PathChange) -> bool {
    category != Category::Deleted || !change.was_retained()
}

/// Whether an update under `policy` has anything to do.
#[must_use]
pub fn has_pending_work(classification: &Classification, policy: DeletionPolicy) -> bool {
    if !format_status(classification).is_empty() {
        return true;
    }
    if policy == DeletionPolicy::HardDelete && !classification.deleted_files.is_empty() {
        return true;
    }
    // A retained file came back; its snapshot record must drop the marker.
    classification
        .unchanged
        .iter()
        .any(PathChange::was_retained)
}
