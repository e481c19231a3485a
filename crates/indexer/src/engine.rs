use crate::differ::{classify, Classification};
use crate::driver::{DeletionPolicy, UpdateDriver, UpdateReport};
use crate::error::Result;
use crate::layout::IndexLayout;
use crate::plan::PlanBuilder;
use crate::snapshot;
use crate::status::{format_status, has_pending_work};
use sift_importers::ImporterRegistry;
use sift_store::DocumentStore;
use std::path::Path;

/// Entry point for the `init` / `status` / `update` cycle on one index root.
pub struct SiftIndexer {
    layout: IndexLayout,
    registry: ImporterRegistry,
    ignored: Vec<String>,
}

impl SiftIndexer {
    /// Indexer for `root` with the default importer registry.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            layout: IndexLayout::new(root)?,
            registry: ImporterRegistry::with_defaults(),
            ignored: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_registry(mut self, registry: ImporterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Extra path components to skip while scanning.
    #[must_use]
    pub fn with_ignored<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(components.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn layout(&self) -> &IndexLayout {
        &self.layout
    }

    #[must_use]
    pub fn registry(&self) -> &ImporterRegistry {
        &self.registry
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        snapshot::exists(&self.layout)
    }

    pub async fn init(&self) -> Result<()> {
        snapshot::create(&self.layout).await?;
        log::info!("Initialized index at {}", self.layout.root().display());
        Ok(())
    }

    /// Diff the persisted snapshot against the current tree.
    pub async fn classify(&self) -> Result<Classification> {
        let snapshot = snapshot::load(&self.layout).await?;
        let plan = PlanBuilder::new(&self.layout, &self.registry)
            .with_ignored(&self.ignored)
            .build()?;
        classify(&snapshot, &plan)
    }

    pub async fn status(&self) -> Result<String> {
        Ok(format_status(&self.classify().await?))
    }

    /// Bring `store` and the snapshot in line with the tree.
    ///
    /// Returns `None` when there was nothing to do; neither the store nor the
    /// snapshot is touched in that case.
    pub async fn update<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        policy: DeletionPolicy,
    ) -> Result<Option<UpdateReport>> {
        let classification = self.classify().await?;
        if !has_pending_work(&classification, policy) {
            log::info!("Index is up to date");
            return Ok(None);
        }

        log::info!(
            "Updating index at {} ({policy:?})",
            self.layout.root().display()
        );
        let report = UpdateDriver::new(&self.layout, &self.registry, store, policy)
            .run(&classification)
            .await?;
        Ok(Some(report))
    }
}
