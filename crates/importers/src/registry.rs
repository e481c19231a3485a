use crate::error::{ImportError, Result};
use crate::importer::Importer;
use crate::{PandocImporter, PdfImporter, TextImporter};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Whitelist of indexable extensions, each mapped to the importer that extracts it.
///
/// Extensions are stored without the leading dot and compared case-sensitively.
#[derive(Clone, Default)]
pub struct ImporterRegistry {
    importers: BTreeMap<String, Arc<dyn Importer>>,
}

impl ImporterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry used by the `sift` command line.
    #[must_use]
    pub fn with_defaults() -> Self {
        let text: Arc<dyn Importer> = Arc::new(TextImporter::new());
        let pandoc: Arc<dyn Importer> = Arc::new(PandocImporter::new());
        let pdf: Arc<dyn Importer> = Arc::new(PdfImporter::new());

        let mut registry = Self::new();
        registry.register_shared("txt", text);
        for ext in ["md", "doc", "docx", "tex", "latex", "html", "epub"] {
            registry.register_shared(ext, Arc::clone(&pandoc));
        }
        registry.register_shared("pdf", pdf);
        registry
    }

    /// Register (or replace) the importer for `extension`.
    pub fn register<I: Importer + 'static>(&mut self, extension: &str, importer: I) {
        self.register_shared(extension, Arc::new(importer));
    }

    pub fn register_shared(&mut self, extension: &str, importer: Arc<dyn Importer>) {
        let extension = extension.trim_start_matches('.').to_string();
        self.importers.insert(extension, importer);
    }

    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&Arc<dyn Importer>> {
        self.importers.get(extension)
    }

    /// Like [`get`](Self::get) but fails for unregistered extensions.
    pub fn require(&self, extension: &str) -> Result<&Arc<dyn Importer>> {
        self.get(extension)
            .ok_or_else(|| ImportError::UnsupportedExtension(extension.to_string()))
    }

    /// Registered extensions paired with their importers, in extension order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Importer>)> {
        self.importers.iter().map(|(ext, imp)| (ext.as_str(), imp))
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.importers.keys().map(String::as_str)
    }

    /// Longest registered extension that `file_name` ends with (`a.tar.gz` prefers
    /// `tar.gz` over `gz`).
    #[must_use]
    pub fn match_extension(&self, file_name: &str) -> Option<&str> {
        self.importers
            .keys()
            .filter(|ext| has_extension(file_name, ext))
            .max_by_key(|ext| ext.len())
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.importers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.importers.is_empty()
    }
}

impl std::fmt::Debug for ImporterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.importers
                    .iter()
                    .map(|(ext, imp)| (ext, format!("{}@{}", imp.name(), imp.version()))),
            )
            .finish()
    }
}

/// True when `file_name` is `<stem>.<extension>` with a non-empty stem.
#[must_use]
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .is_some_and(|stem| !stem.is_empty())
}
