use crate::error::Result;
use crate::layout::IndexLayout;
use crate::record::FileRecord;
use crate::scanner::FileScanner;
use sift_importers::ImporterRegistry;
use std::collections::BTreeMap;

/// Files currently on disk, annotated with the importer that would extract them.
///
/// Rebuilt from scratch on every run; at most one record per path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    records: BTreeMap<String, FileRecord>,
}

impl Plan {
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.records.get(path)
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

impl FromIterator<FileRecord> for Plan {
    /// Later records replace earlier ones with the same path.
    fn from_iter<T: IntoIterator<Item = FileRecord>>(iter: T) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|record| (record.path.clone(), record))
                .collect(),
        }
    }
}

/// Builds a [`Plan`] by scanning the root once per registered extension.
pub struct PlanBuilder<'a> {
    layout: &'a IndexLayout,
    registry: &'a ImporterRegistry,
    ignored: Vec<String>,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(layout: &'a IndexLayout, registry: &'a ImporterRegistry) -> Self {
        Self {
            layout,
            registry,
            ignored: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ignored(mut self, components: &[String]) -> Self {
        self.ignored.extend_from_slice(components);
        self
    }

    /// Fails when part of the tree could not be read; a partial plan would make
    /// unread files look deleted.
    pub fn build(&self) -> Result<Plan> {
        let mut records = BTreeMap::new();

        for (extension, importer) in self.registry.iter() {
            let scanner =
                FileScanner::new(self.layout.root(), extension).with_ignored(self.ignored.clone());
            let mut matched = 0usize;

            for file in scanner.scan() {
                let file = file?;
                let Some(name) = file.path.file_name().and_then(|n| n.to_str()) else {
                    log::warn!("Skipping {}: file name is not UTF-8", file.path.display());
                    continue;
                };
                // A longer registered extension claims this file.
                if self.registry.match_extension(name) != Some(extension) {
                    continue;
                }

                let Some(key) = self.layout.relative_key(&file.path) else {
                    log::warn!("Skipping {}: path is not UTF-8", file.path.display());
                    continue;
                };
                records.insert(
                    key.clone(),
                    FileRecord::new(
                        key,
                        file.last_modified,
                        extension,
                        importer.name(),
                        importer.version(),
                    ),
                );
                matched += 1;
            }

            if matched > 0 {
                log::debug!("Planned {matched} .{extension} file(s) for {}", importer.name());
            }
        }

        log::info!(
            "Scanned {}: {} indexable file(s)",
            self.layout.root().display(),
            records.len()
        );

        Ok(Plan { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sift_importers::{PandocImporter, TextImporter};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn records_carry_importer_identity() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("notes")).unwrap();
        fs::write(tmp.path().join("notes/a.txt"), "a").unwrap();
        fs::write(tmp.path().join("b.md"), "# b").unwrap();
        fs::write(tmp.path().join("c.bin"), "c").unwrap();

        let layout = IndexLayout::new(tmp.path()).unwrap();
        let registry = ImporterRegistry::with_defaults();
        let plan = PlanBuilder::new(&layout, &registry).build().unwrap();

        assert_eq!(plan.len(), 2);
        let text = plan.get("notes/a.txt").unwrap();
        assert_eq!(text.extension, "txt");
        assert_eq!(text.strategy_name, TextImporter::NAME);
        assert_eq!(text.strategy_version, 1);
        assert!(!text.retained);
        assert_eq!(plan.get("b.md").unwrap().strategy_name, PandocImporter::NAME);
    }

    #[test]
    fn overlapping_extensions_yield_one_record() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("backup.tar.gz"), "x").unwrap();
        fs::write(tmp.path().join("log.gz"), "x").unwrap();

        let mut registry = ImporterRegistry::new();
        registry.register("gz", TextImporter::new());
        registry.register("tar.gz", PandocImporter::new());

        let layout = IndexLayout::new(tmp.path()).unwrap();
        let plan = PlanBuilder::new(&layout, &registry).build().unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.get("backup.tar.gz").unwrap().extension, "tar.gz");
        assert_eq!(plan.get("log.gz").unwrap().extension, "gz");
    }

    #[test]
    fn ignored_components_are_not_planned() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("vendor")).unwrap();
        fs::write(tmp.path().join("vendor/skip.txt"), "x").unwrap();
        fs::write(tmp.path().join("keep.txt"), "x").unwrap();

        let layout = IndexLayout::new(tmp.path()).unwrap();
        let registry = ImporterRegistry::with_defaults();
        let plan = PlanBuilder::new(&layout, &registry)
            .with_ignored(&["vendor".to_string()])
            .build()
            .unwrap();

        let paths: Vec<&str> = plan.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["keep.txt"]);
    }

    #[test]
    fn unreadable_root_fails_the_build() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("tree");
        fs::create_dir_all(&root).unwrap();
        let layout = IndexLayout::new(&root).unwrap();
        fs::remove_dir(&root).unwrap();

        let registry = ImporterRegistry::with_defaults();
        let err = PlanBuilder::new(&layout, &registry).build().unwrap_err();
        assert!(matches!(err, crate::IndexerError::WalkError(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_directories_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let odd = tmp.path().join(OsStr::from_bytes(b"caf\xe9"));
        fs::create_dir_all(&odd).unwrap();
        fs::write(odd.join("a.txt"), "x").unwrap();
        fs::write(tmp.path().join("ok.txt"), "x").unwrap();

        let layout = IndexLayout::new(tmp.path()).unwrap();
        let registry = ImporterRegistry::with_defaults();
        let plan = PlanBuilder::new(&layout, &registry).build().unwrap();

        let paths: Vec<&str> = plan.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["ok.txt"]);
    }
}
