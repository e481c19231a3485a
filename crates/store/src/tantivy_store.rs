use crate::document::{Document, SearchHit};
use crate::error::{Result, StoreError};
use crate::store::DocumentStore;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tantivy::collector::{Count, TopDocs};
use tantivy::directory::MmapDirectory;
use tantivy::query::{QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value, INDEXED, STORED, STRING, TEXT};
use tantivy::snippet::SnippetGenerator;
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

const FIELD_KEY: &str = "key";
const FIELD_FULLPATH: &str = "fullpath";
const FIELD_BODY: &str = "body";
const FIELD_LAST_MODIFIED: &str = "last_modified";

const WRITER_HEAP_BYTES: usize = 50_000_000;
pub const DEFAULT_EXCERPT_CHARS: usize = 150;

const HIGHLIGHT_MARK: &str = "*";

#[derive(Debug, Clone, Copy)]
struct Fields {
    /// Untokenized path, used for exact lookups and deletes.
    key: Field,
    /// Tokenized path, searchable by file and directory names.
    fullpath: Field,
    body: Field,
    last_modified: Field,
}

impl Fields {
    fn resolve(schema: &Schema) -> Result<Self> {
        let get = |name: &'static str| {
            schema
                .get_field(name)
                .map_err(|_| StoreError::SchemaMismatch(name))
        };
        Ok(Self {
            key: get(FIELD_KEY)?,
            fullpath: get(FIELD_FULLPATH)?,
            body: get(FIELD_BODY)?,
            last_modified: get(FIELD_LAST_MODIFIED)?,
        })
    }
}

fn build_schema() -> Schema {
    let mut builder = Schema::builder();
    builder.add_text_field(FIELD_KEY, STRING | STORED);
    builder.add_text_field(FIELD_FULLPATH, TEXT | STORED);
    builder.add_text_field(FIELD_BODY, TEXT | STORED);
    builder.add_i64_field(FIELD_LAST_MODIFIED, INDEXED | STORED);
    builder.build()
}

/// On-disk tantivy index implementing [`DocumentStore`].
///
/// One writer and one manually reloaded reader are held for the lifetime of the
/// value; the reader is refreshed after every commit. Dropping the store without
/// committing discards pending mutations.
pub struct TantivyStore {
    dir: PathBuf,
    index: Index,
    reader: IndexReader,
    writer: IndexWriter,
    fields: Fields,
    excerpt_max_chars: usize,
}

impl TantivyStore {
    /// Open the index in `dir`, creating the directory and an empty index if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;

        let directory = MmapDirectory::open(&dir)?;
        let index = Index::open_or_create(directory, build_schema())?;
        let fields = Fields::resolve(&index.schema())?;

        let writer: IndexWriter = index.writer_with_num_threads(1, WRITER_HEAP_BYTES)?;
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        log::debug!("Opened document store at {}", dir.display());

        Ok(Self {
            dir,
            index,
            reader,
            writer,
            fields,
            excerpt_max_chars: DEFAULT_EXCERPT_CHARS,
        })
    }

    #[must_use]
    pub fn with_excerpt_max_chars(mut self, max_chars: usize) -> Self {
        self.excerpt_max_chars = max_chars;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of committed documents.
    #[must_use]
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Remove every document. Takes effect on the next commit.
    pub fn delete_all(&mut self) -> Result<()> {
        self.writer.delete_all_documents()?;
        Ok(())
    }

    fn key_term(&self, key: &str) -> Term {
        Term::from_field_text(self.fields.key, key)
    }

    fn to_tantivy(&self, document: Document) -> TantivyDocument {
        let f = self.fields;
        doc!(
            f.key => document.key.clone(),
            f.fullpath => document.key,
            f.body => document.body,
            f.last_modified => document.last_modified,
        )
    }
}

impl DocumentStore for TantivyStore {
    fn insert(&mut self, document: Document) -> Result<String> {
        let key = document.key.clone();
        let term = self.key_term(&key);
        let doc = self.to_tantivy(document);
        // Re-inserting a key replaces it.
        self.writer.delete_term(term);
        self.writer.add_document(doc)?;
        Ok(key)
    }

    fn update(&mut self, key: &str, document: Document) -> Result<String> {
        let term = self.key_term(key);
        let doc = self.to_tantivy(document);
        // Delete and add land in the same commit.
        self.writer.delete_term(term);
        self.writer.add_document(doc)?;
        Ok(key.to_string())
    }

    fn delete(&mut self, key: &str) -> Result<String> {
        let term = self.key_term(key);
        self.writer.delete_term(term);
        Ok(key.to_string())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let searcher = self.reader.searcher();
        let query = TermQuery::new(self.key_term(key), IndexRecordOption::Basic);
        Ok(searcher.search(&query, &Count)? > 0)
    }

    fn commit(&mut self) -> Result<()> {
        self.writer.commit()?;
        self.reader.reload()?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.writer.rollback()?;
        Ok(())
    }

    fn search(&self, terms: &str, limit: usize) -> Result<Vec<SearchHit>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let f = self.fields;
        let searcher = self.reader.searcher();
        let parser = QueryParser::for_index(&self.index, vec![f.fullpath, f.body]);
        let (query, errors) = parser.parse_query_lenient(terms);
        for err in errors {
            log::debug!("Ignoring part of query '{terms}': {err}");
        }

        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;
        let mut snippets = SnippetGenerator::create(&searcher, &*query, f.body)?;
        snippets.set_max_num_chars(self.excerpt_max_chars);

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            let path = doc
                .get_first(f.key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let last_modified = doc
                .get_first(f.last_modified)
                .and_then(|v| v.as_i64())
                .unwrap_or_default();

            let snippet = snippets.snippet_from_doc(&doc);
            let excerpt = highlight(snippet.fragment(), snippet.highlighted());

            hits.push(SearchHit {
                path,
                last_modified,
                score,
                excerpt: (!excerpt.is_empty()).then_some(excerpt),
            });
        }

        Ok(hits)
    }
}

/// Wrap every highlighted range of `fragment` in `*` marks.
fn highlight(fragment: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(fragment.len() + ranges.len() * 2);
    let mut cursor = 0;
    for range in ranges {
        if range.start < cursor || range.end > fragment.len() {
            continue;
        }
        out.push_str(&fragment[cursor..range.start]);
        out.push_str(HIGHLIGHT_MARK);
        out.push_str(&fragment[range.clone()]);
        out.push_str(HIGHLIGHT_MARK);
        cursor = range.end;
    }
    out.push_str(&fragment[cursor..]);
    out.trim().to_string()
}
