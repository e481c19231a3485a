use pretty_assertions::assert_eq;
use sift_store::{Document, DocumentStore, TantivyStore};
use tempfile::TempDir;

fn populated(tmp: &TempDir) -> TantivyStore {
    let mut store = TantivyStore::open(tmp.path().join("index")).unwrap();
    store
        .insert(Document::new(
            "animals/fox.txt",
            1_000,
            "The quick brown fox jumps over the lazy dog. The fox runs. A fox hides.",
        ))
        .unwrap();
    store
        .insert(Document::new(
            "animals/dog.txt",
            2_000,
            "A lazy dog sleeps all afternoon in the sun.",
        ))
        .unwrap();
    store.commit().unwrap();
    store
}

#[test]
fn term_in_one_document_returns_one_hit() {
    let tmp = TempDir::new().unwrap();
    let store = populated(&tmp);

    let hits = store.search("sleeps", 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, "animals/dog.txt");
    assert_eq!(hits[0].last_modified, 2_000);
}

#[test]
fn shared_term_returns_both_best_first() {
    let tmp = TempDir::new().unwrap();
    let store = populated(&tmp);

    let hits = store.search("fox dog", 5).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].path, "animals/fox.txt");
    assert!(hits[0].score >= hits[1].score);
}

#[test]
fn limit_caps_hit_count() {
    let tmp = TempDir::new().unwrap();
    let store = populated(&tmp);

    assert_eq!(store.search("lazy", 1).unwrap().len(), 1);
    assert!(store.search("lazy", 0).unwrap().is_empty());
}

#[test]
fn excerpt_highlights_matched_terms() {
    let tmp = TempDir::new().unwrap();
    let store = populated(&tmp);

    let hits = store.search("sleeps", 5).unwrap();
    let excerpt = hits[0].excerpt.as_deref().unwrap();
    assert!(excerpt.contains("*sleeps*"), "excerpt was {excerpt:?}");
}

#[test]
fn unknown_term_returns_nothing() {
    let tmp = TempDir::new().unwrap();
    let store = populated(&tmp);

    assert!(store.search("zebra", 5).unwrap().is_empty());
}
