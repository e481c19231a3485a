use crate::error::Result;
use crate::layout::STATE_DIR;
use sift_importers::has_extension;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::{DirEntry, WalkDir};

/// A regular file found by [`FileScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Unix milliseconds.
    pub last_modified: i64,
}

/// Walks a directory tree for regular files with one extension.
///
/// Symlinks are followed only to decide whether an entry is a regular file; a
/// symlink to a directory is neither yielded nor descended into. Any entry with a
/// path component (relative to the root) in the ignore set is skipped, and so is
/// its whole subtree.
pub struct FileScanner {
    root: PathBuf,
    extension: String,
    ignored: BTreeSet<String>,
}

impl FileScanner {
    /// Scanner for `*.{extension}` under `root`. The state directory is always ignored.
    pub fn new(root: impl AsRef<Path>, extension: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: extension.into().trim_start_matches('.').to_string(),
            ignored: BTreeSet::from([STATE_DIR.to_string()]),
        }
    }

    /// Add path components to skip.
    #[must_use]
    pub fn with_ignored<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(components.into_iter().map(Into::into));
        self
    }

    /// Lazily yield matching files. No ordering is guaranteed.
    ///
    /// Entries that vanish during the walk are skipped. Any other walk failure,
    /// such as an unreadable directory, is yielded as an error: the files below it
    /// are unknown, not gone.
    pub fn scan(&self) -> impl Iterator<Item = Result<ScannedFile>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| !self.is_ignored(entry.path()))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.accept(&entry).map(Ok),
                Err(err) if vanished(&err) => {
                    log::debug!("Skipping vanished entry: {err}");
                    None
                }
                Err(err) => {
                    log::warn!("Cannot scan {}: {err}", self.root.display());
                    Some(Err(err.into()))
                }
            })
    }

    fn accept(&self, entry: &DirEntry) -> Option<ScannedFile> {
        let name = entry.file_name().to_str()?;
        if !has_extension(name, &self.extension) {
            return None;
        }

        // Follows symlinks, unlike the walk itself.
        let metadata = match std::fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(err) => {
                log::debug!("Skipping {}: {err}", entry.path().display());
                return None;
            }
        };
        if !metadata.is_file() {
            return None;
        }

        let last_modified = match metadata.modified() {
            Ok(modified) => unix_ms(modified),
            Err(err) => {
                log::debug!("Skipping {}: {err}", entry.path().display());
                return None;
            }
        };

        Some(ScannedFile {
            path: entry.path().to_path_buf(),
            last_modified,
        })
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        relative.components().any(|component| match component {
            Component::Normal(part) => self.ignored.contains(part.to_string_lossy().as_ref()),
            _ => false,
        })
    }
}

/// Not-found below the root means the entry disappeared mid-walk.
fn vanished(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

pub(crate) fn unix_ms(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
    }
}
