//! Persisted record of the files synchronized by the last successful update.
//!
//! Stored as a CSV table at `.siftindex/metadata.csv`. The file is only ever read
//! whole and replaced whole.

use crate::error::{IndexerError, Result};
use crate::layout::IndexLayout;
use crate::record::FileRecord;
use std::collections::BTreeMap;

const HEADER: [&str; 6] = [
    "path",
    "last_modified",
    "extension",
    "strategy_name",
    "strategy_version",
    "retained",
];

/// Columns older snapshot files may lack.
const OPTIONAL_COLUMNS: [&str; 1] = ["retained"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: BTreeMap<String, FileRecord>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot, rejecting duplicate paths.
    pub fn from_records(records: impl IntoIterator<Item = FileRecord>) -> Result<Self> {
        let mut snapshot = Self::new();
        for record in records {
            if snapshot.records.contains_key(&record.path) {
                return Err(IndexerError::MalformedSnapshot(format!(
                    "duplicate path '{}'",
                    record.path
                )));
            }
            snapshot.records.insert(record.path.clone(), record);
        }
        Ok(snapshot)
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.records.get(path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.records.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in path order.
    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    pub(crate) fn records(&self) -> &BTreeMap<String, FileRecord> {
        &self.records
    }
}

#[must_use]
pub fn exists(layout: &IndexLayout) -> bool {
    layout.snapshot_path().is_file()
}

/// Create the state directory and an empty snapshot.
pub async fn create(layout: &IndexLayout) -> Result<()> {
    if exists(layout) {
        return Err(IndexerError::AlreadyInitialized(layout.root().to_path_buf()));
    }
    tokio::fs::create_dir_all(layout.state_dir()).await?;
    save(layout, &Snapshot::new()).await
}

pub async fn load(layout: &IndexLayout) -> Result<Snapshot> {
    let path = layout.snapshot_path();
    if !path.is_file() {
        return Err(IndexerError::NotInitialized(layout.root().to_path_buf()));
    }

    let bytes = tokio::fs::read(&path).await?;
    let snapshot = decode(&bytes)?;
    log::debug!(
        "Loaded snapshot {} ({} record(s))",
        path.display(),
        snapshot.len()
    );
    Ok(snapshot)
}

/// Replace the snapshot on disk. Readers see either the old or the new file.
pub async fn save(layout: &IndexLayout, snapshot: &Snapshot) -> Result<()> {
    let path = layout.snapshot_path();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let bytes = encode(snapshot)?;
    let tmp = path.with_extension("csv.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, &path).await?;
    Ok(())
}

fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in snapshot.iter() {
        writer.serialize(record)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

fn decode(bytes: &[u8]) -> Result<Snapshot> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader.headers()?.clone();
    for column in HEADER {
        if !OPTIONAL_COLUMNS.contains(&column) && !headers.iter().any(|h| h == column) {
            return Err(IndexerError::MalformedSnapshot(format!(
                "missing column '{column}'"
            )));
        }
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<FileRecord>().enumerate() {
        let record = result.map_err(|err| {
            IndexerError::MalformedSnapshot(format!("row {}: {err}", row + 1))
        })?;
        records.push(record);
    }

    Snapshot::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn layout(tmp: &TempDir) -> IndexLayout {
        IndexLayout::new(tmp.path()).unwrap()
    }

    fn record(path: &str, mtime: i64) -> FileRecord {
        FileRecord::new(path, mtime, "txt", "TextImporter", 1)
    }

    #[tokio::test]
    async fn create_writes_empty_snapshot_with_header() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);

        assert!(!exists(&layout));
        create(&layout).await.unwrap();
        assert!(exists(&layout));

        let text = std::fs::read_to_string(layout.snapshot_path()).unwrap();
        assert_eq!(
            text,
            "path,last_modified,extension,strategy_name,strategy_version,retained\n"
        );
        assert_eq!(load(&layout).await.unwrap(), Snapshot::new());
    }

    #[tokio::test]
    async fn create_twice_fails() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);

        create(&layout).await.unwrap();
        let err = create(&layout).await.unwrap_err();
        assert!(matches!(err, IndexerError::AlreadyInitialized(_)));
    }

    #[tokio::test]
    async fn load_without_init_fails() {
        let tmp = TempDir::new().unwrap();
        let err = load(&layout(&tmp)).await.unwrap_err();
        assert!(matches!(err, IndexerError::NotInitialized(_)));
    }

    #[tokio::test]
    async fn save_then_load_preserves_records() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(&tmp);
        let snapshot = Snapshot::from_records(vec![
            record("a.txt", 1_000),
            record("dir/b, with comma.txt", -5).into_retained(),
        ])
        .unwrap();

        save(&layout, &snapshot).await.unwrap();
        assert_eq!(load(&layout).await.unwrap(), snapshot);
        assert!(!layout.snapshot_path().with_extension("csv.tmp").exists());
    }

    #[test]
    fn duplicate_paths_are_malformed() {
        let err = decode(
            b"path,last_modified,extension,strategy_name,strategy_version\n\
              a.txt,1,txt,TextImporter,1\n\
              a.txt,2,txt,TextImporter,1\n",
        )
        .unwrap_err();
        assert!(matches!(err, IndexerError::MalformedSnapshot(msg) if msg.contains("a.txt")));
    }

    #[test]
    fn missing_column_is_malformed() {
        let err = decode(b"path,last_modified,extension\na.txt,1,txt\n").unwrap_err();
        assert!(
            matches!(err, IndexerError::MalformedSnapshot(msg) if msg.contains("strategy_name"))
        );
    }

    #[test]
    fn bad_value_is_malformed() {
        let err = decode(
            b"path,last_modified,extension,strategy_name,strategy_version\n\
              a.txt,yesterday,txt,TextImporter,1\n",
        )
        .unwrap_err();
        assert!(matches!(err, IndexerError::MalformedSnapshot(msg) if msg.starts_with("row 1")));
    }

    #[test]
    fn retained_column_defaults_to_false() {
        let snapshot = decode(
            b"path,last_modified,extension,strategy_name,strategy_version\n\
              a.txt,1,txt,TextImporter,1\n",
        )
        .unwrap();
        assert_eq!(snapshot.get("a.txt").unwrap(), &record("a.txt", 1));
    }
}
