use crate::config::SiftConfig;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use sift_indexer::{DeletionPolicy, IndexerError, SiftIndexer};
use sift_store::{format_hit, DocumentStore, SearchHit, TantivyStore};
use std::path::Path;

/// Everything a command needs about one index root.
pub struct Workspace {
    pub indexer: SiftIndexer,
    pub config: SiftConfig,
}

impl Workspace {
    pub async fn open(root: &Path) -> Result<Self> {
        let indexer = SiftIndexer::new(root)
            .with_context(|| format!("Cannot use {} as an index root", root.display()))?;
        let config = SiftConfig::load(&indexer.layout().config_path()).await?;
        let indexer = indexer.with_ignored(config.ignore.iter().cloned());
        Ok(Self { indexer, config })
    }

    fn require_initialized(&self) -> Result<()> {
        if !self.indexer.is_initialized() {
            let root = self.indexer.layout().root().to_path_buf();
            return Err(IndexerError::NotInitialized(root).into());
        }
        Ok(())
    }

    fn open_store(&self) -> Result<TantivyStore> {
        let dir = self.indexer.layout().store_dir();
        let store = TantivyStore::open(&dir)
            .with_context(|| format!("Failed to open document store at {}", dir.display()))?;
        Ok(store.with_excerpt_max_chars(self.config.excerpt_max_chars))
    }
}

pub async fn init(ws: &Workspace) -> Result<()> {
    ws.indexer.init().await?;
    // Empty store, queryable before the first update.
    ws.open_store()?;
    println!("Index created");
    Ok(())
}

pub async fn status(ws: &Workspace) -> Result<()> {
    let text = ws.indexer.status().await?;
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

pub async fn update(ws: &Workspace, delete_missing: bool) -> Result<()> {
    ws.require_initialized()?;
    let policy = DeletionPolicy::from_delete_missing(delete_missing);

    let mut store = ws.open_store()?;
    match ws
        .indexer
        .update(&mut store, policy)
        .await
        .context("Update failed; the index was left unchanged")?
    {
        None => println!("Nothing to update."),
        Some(report) => {
            for action in &report.actions {
                println!("{action}");
            }
            println!("{}", report.summary());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    results: &'a [SearchHit],
}

pub fn query(ws: &Workspace, terms: &[String], limit: Option<usize>, json: bool) -> Result<()> {
    ws.require_initialized()?;
    let query = terms.join(" ");
    if query.trim().is_empty() {
        bail!("Query is empty");
    }

    let limit = limit.unwrap_or(ws.config.query_limit);
    let store = ws.open_store()?;
    let hits = store
        .search(&query, limit)
        .with_context(|| format!("Search for '{query}' failed"))?;

    if json {
        let output = QueryOutput {
            query: &query,
            results: &hits,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Results for: {query}");
    let rendered: Vec<String> = hits.iter().map(format_hit).collect();
    if !rendered.is_empty() {
        println!("{}", rendered.join("\n\n"));
    }
    Ok(())
}
