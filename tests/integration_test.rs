// Integration tests for semstore
use semstore::prelude::*;
use semstore_core::{
    BatchObject, CollectionSchema, Error, FailedObject, Query, QueryObject, Result as CoreResult,
    UUID_KEY, VECTOR_KEY,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Embeddings with a fixed vector per known text
struct FixedEmbeddings(HashMap<String, Vec<f32>>);

impl FixedEmbeddings {
    fn new(entries: &[(&str, [f32; 3])]) -> Self {
        Self(
            entries
                .iter()
                .map(|(text, v)| (text.to_string(), v.to_vec()))
                .collect(),
        )
    }
}

impl Embeddings for FixedEmbeddings {
    fn embed_documents(&self, texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_query(t)).collect()
    }

    fn embed_query(&self, text: &str) -> CoreResult<Vec<f32>> {
        self.0
            .get(text)
            .cloned()
            .ok_or_else(|| Error::Embedding(format!("no vector for {text:?}")))
    }
}

/// Bootstraps like a healthy engine, then loses its connection on queries
struct UnreachableEngine(MemoryEngine);

impl SearchEngine for UnreachableEngine {
    fn collection_exists(&self, name: &str) -> CoreResult<bool> {
        self.0.collection_exists(name)
    }

    fn create_collection(&self, schema: &CollectionSchema) -> CoreResult<()> {
        self.0.create_collection(schema)
    }

    fn collection_config(&self, name: &str) -> CoreResult<CollectionSchema> {
        self.0.collection_config(name)
    }

    fn list_tenants(&self, collection: &str) -> CoreResult<Vec<String>> {
        self.0.list_tenants(collection)
    }

    fn create_tenants(&self, collection: &str, tenants: &[String]) -> CoreResult<()> {
        self.0.create_tenants(collection, tenants)
    }

    fn batch_write(&self, collection: &str, objects: Vec<BatchObject>) -> CoreResult<Vec<FailedObject>> {
        self.0.batch_write(collection, objects)
    }

    fn query(&self, _collection: &str, _tenant: Option<&str>, _query: &Query) -> CoreResult<Vec<QueryObject>> {
        Err(Error::Transport("connection refused".to_string()))
    }

    fn delete_many(&self, collection: &str, tenant: Option<&str>, filter: &FilterCondition) -> CoreResult<usize> {
        self.0.delete_many(collection, tenant, filter)
    }
}

/// Hashing embeddings that count how often they are asked
#[derive(Default)]
struct CountingEmbeddings {
    inner: HashEmbeddings,
    calls: AtomicUsize,
}

impl CountingEmbeddings {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embeddings for CountingEmbeddings {
    fn embed_documents(&self, texts: &[String]) -> CoreResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed_documents(texts)
    }

    fn embed_query(&self, text: &str) -> CoreResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed_query(text)
    }
}

/// Another client creates the tenant between our existence check and our create
struct RacingTenantEngine(MemoryEngine);

impl SearchEngine for RacingTenantEngine {
    fn collection_exists(&self, name: &str) -> CoreResult<bool> {
        self.0.collection_exists(name)
    }

    fn create_collection(&self, schema: &CollectionSchema) -> CoreResult<()> {
        self.0.create_collection(schema)
    }

    fn collection_config(&self, name: &str) -> CoreResult<CollectionSchema> {
        self.0.collection_config(name)
    }

    fn list_tenants(&self, _collection: &str) -> CoreResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn create_tenants(&self, collection: &str, tenants: &[String]) -> CoreResult<()> {
        let _ = self.0.create_tenants(collection, tenants);
        Err(Error::TenantExists(tenants.join(",")))
    }

    fn batch_write(&self, collection: &str, objects: Vec<BatchObject>) -> CoreResult<Vec<FailedObject>> {
        self.0.batch_write(collection, objects)
    }

    fn query(&self, collection: &str, tenant: Option<&str>, query: &Query) -> CoreResult<Vec<QueryObject>> {
        self.0.query(collection, tenant, query)
    }

    fn delete_many(&self, collection: &str, tenant: Option<&str>, filter: &FilterCondition) -> CoreResult<usize> {
        self.0.delete_many(collection, tenant, filter)
    }
}

fn metadata(value: serde_json::Value) -> Metadata {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("metadata must be an object"),
    }
}

fn hash_store(name: &str, multi_tenancy: bool) -> (Arc<MemoryEngine>, VectorStore) {
    let embedding: Arc<dyn Embeddings> = Arc::new(HashEmbeddings::default());
    let engine = Arc::new(MemoryEngine::new().with_vectorizer(embedding.clone()));
    let store = VectorStore::new(
        engine.clone(),
        StoreConfig::new(name, "text").with_multi_tenancy(multi_tenancy),
        Some(embedding),
    )
    .unwrap();
    (engine, store)
}

fn mmr_store() -> VectorStore {
    let embedding = Arc::new(FixedEmbeddings::new(&[
        ("query", [1.0, 0.0, 0.0]),
        ("first", [0.9, 0.1, 0.0]),
        ("first again", [0.89, 0.11, 0.0]),
        ("something else", [0.5, 0.0, 0.5]),
    ]));
    let store = VectorStore::new(
        Arc::new(MemoryEngine::new()),
        StoreConfig::new("Mmr", "text"),
        Some(embedding),
    )
    .unwrap();
    store
        .add_texts(&["first", "first again", "something else"], None, None, None)
        .unwrap();
    store
}

#[test]
fn test_add_then_search_round_trip() {
    let (_, store) = hash_store("RoundTrip", false);
    let ids = store
        .add_texts(&["hello"], Some(&[metadata(json!({"source": "x"}))]), None, None)
        .unwrap();
    assert_eq!(ids.len(), 1);

    let docs = store.similarity_search("hello", 1, &SearchOptions::default()).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "hello");
    assert_eq!(docs[0].metadata.get("source"), Some(&json!("x")));
    assert!(!docs[0].metadata.contains_key("text"));
    assert!(!docs[0].metadata.contains_key(VECTOR_KEY));
    assert!(!docs[0].metadata.contains_key(UUID_KEY));

    let docs = store
        .similarity_search("hello", 1, &SearchOptions::new(SearchMode::Text))
        .unwrap();
    assert_eq!(docs[0].content, "hello");
    assert_eq!(docs[0].metadata.get("source"), Some(&json!("x")));
}

#[test]
fn test_generated_index_name() {
    let store = VectorStore::new(Arc::new(MemoryEngine::new()), StoreConfig::default(), None).unwrap();
    assert!(store.index_name().starts_with("Store_"));
    assert_eq!(store.query_attrs(), &["text".to_string()]);
}

#[test]
fn test_existing_collection_decides_multi_tenancy() {
    let engine = Arc::new(MemoryEngine::new());
    engine
        .create_collection(&CollectionSchema::new("Shared", true))
        .unwrap();

    let store = VectorStore::new(engine, StoreConfig::new("Shared", "text"), None).unwrap();
    assert!(store.multi_tenancy_enabled());
}

#[test]
fn test_partial_batch_failure_still_returns_all_ids() {
    let (engine, store) = hash_store("Partial", false);
    let ids = vec![
        "6f1a6d2e-6c1b-4f0e-9a53-2f4b0f3a9d11".to_string(),
        "definitely-not-a-uuid".to_string(),
        "0b7c0c52-3f55-4e5b-8d1e-5d1c7a1e2b33".to_string(),
    ];

    let report = store
        .add_texts_with_report(&["one", "two", "three"], None, Some(&ids), None)
        .unwrap();
    assert_eq!(report.ids, ids);
    assert!(!report.is_complete());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].original_id, "definitely-not-a-uuid");

    assert_eq!(engine.get_collection("Partial").unwrap().count(), 2);
}

#[test]
fn test_small_batches_write_everything() {
    let embedding: Arc<dyn Embeddings> = Arc::new(HashEmbeddings::default());
    let engine = Arc::new(MemoryEngine::new());
    let config = StoreConfig {
        batch_size: 2,
        ..StoreConfig::new("Batched", "text")
    };
    let store = VectorStore::new(engine.clone(), config, Some(embedding)).unwrap();

    let texts: Vec<String> = (0..7).map(|i| format!("document number {i}")).collect();
    let ids = store.add_texts(&texts, None, None, None).unwrap();
    assert_eq!(ids.len(), 7);
    assert_eq!(engine.get_collection("Batched").unwrap().count(), 7);
}

#[test]
fn test_misaligned_metadata_rejected() {
    let (_, store) = hash_store("Misaligned", false);
    let err = store
        .add_texts(&["a", "b"], Some(&[Metadata::new()]), None, None)
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));
}

#[test]
fn test_tenant_context_must_match_collection() {
    let (_, single) = hash_store("Single", false);
    let err = single.add_texts(&["a"], None, None, Some("acme")).unwrap_err();
    assert!(matches!(err, StoreError::Configuration(msg) if msg.contains("not enabled")));

    let err = single
        .similarity_search("a", 1, &SearchOptions::default().with_tenant("acme"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(msg) if msg.contains("not enabled")));

    let err = single.delete(Some(&["x".to_string()]), Some("acme")).unwrap_err();
    assert!(matches!(err, StoreError::Configuration(msg) if msg.contains("not enabled")));

    let (_, multi) = hash_store("Multi", true);
    let err = multi.add_texts(&["a"], None, None, None).unwrap_err();
    assert!(matches!(err, StoreError::Configuration(msg) if msg.contains("Must use tenant")));

    let err = multi
        .similarity_search("a", 1, &SearchOptions::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    let err = multi.delete(Some(&["x".to_string()]), None).unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));
}

#[test]
fn test_tenants_are_created_and_isolated() {
    let (_, store) = hash_store("Tenants", true);
    store.add_texts(&["apples"], None, None, Some("a")).unwrap();
    store.add_texts(&["bananas"], None, None, Some("b")).unwrap();
    assert!(store.tenant_exists("a").unwrap());
    assert!(store.tenant_exists("b").unwrap());
    assert!(!store.tenant_exists("c").unwrap());

    let docs = store
        .similarity_search("fruit", 5, &SearchOptions::default().with_tenant("a"))
        .unwrap();
    let contents: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
    assert_eq!(contents, vec!["apples"]);
}

#[test]
fn test_upsert_is_scoped_per_tenant() {
    let (engine, store) = hash_store("Upsert", true);
    let id = vec!["9a3e8a4e-43a4-4a61-9f0b-3c8e9f2c1d44".to_string()];

    store.add_texts(&["first"], None, Some(&id), Some("a")).unwrap();
    store.add_texts(&["second"], None, Some(&id), Some("a")).unwrap();
    store.add_texts(&["other tenant"], None, Some(&id), Some("b")).unwrap();

    assert_eq!(engine.get_collection("Upsert").unwrap().count(), 2);

    let docs = store
        .similarity_search("first second", 5, &SearchOptions::default().with_tenant("a"))
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "second");
}

#[test]
#[should_panic(expected = "multi-tenancy is not enabled")]
fn test_tenant_exists_panics_without_multi_tenancy() {
    let (_, store) = hash_store("NoTenants", false);
    let _ = store.tenant_exists("acme");
}

#[test]
fn test_hybrid_without_embedder_is_keyword_only() {
    let store = VectorStore::new(
        Arc::new(MemoryEngine::new()),
        StoreConfig::new("Keywords", "text"),
        None,
    )
    .unwrap();
    store
        .add_texts(&["the quick brown fox", "a lazy dog", "zebra crossing"], None, None, None)
        .unwrap();

    let hits = store
        .similarity_search_with_score("lazy dog", 3, &SearchOptions::default())
        .unwrap();
    assert_eq!(hits[0].0.content, "a lazy dog");
    assert!(hits[0].1.value > 0.0);
    assert!(hits[0].1.explanation.contains("keyword"));

    let options = SearchOptions::default().with_keyword_query("zebra");
    let docs = store.similarity_search("lazy dog", 1, &options).unwrap();
    assert_eq!(docs[0].content, "zebra crossing");
}

#[test]
fn test_hybrid_requires_query_string() {
    let (_, store) = hash_store("NoQuery", false);
    let err = store.search(None, 1, &SearchOptions::default(), false).unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));
}

#[test]
fn test_zero_k_rejected() {
    let (_, store) = hash_store("ZeroK", false);
    let err = store
        .similarity_search("anything", 0, &SearchOptions::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));
}

#[test]
fn test_vector_mode_needs_a_vector() {
    let (_, store) = hash_store("NeedsVector", false);
    store.add_texts(&["hello"], None, None, None).unwrap();

    let err = store
        .similarity_search("hello", 1, &SearchOptions::new(SearchMode::Vector))
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    let query = store.embeddings().unwrap().embed_query("hello").unwrap();
    let options = SearchOptions::new(SearchMode::Vector).with_near_vector(query.clone());
    let hits = store.similarity_search_with_score("hello", 1, &options).unwrap();
    assert_eq!(hits[0].0.content, "hello");
    assert!((hits[0].1.value - 1.0).abs() < 1e-4);
    assert!(hits[0].0.metadata.contains_key("distance"));

    let docs = store
        .similarity_search_by_vector(&query, 1, &SearchOptions::default())
        .unwrap();
    assert_eq!(docs[0].content, "hello");
}

#[test]
fn test_text_mode_uses_engine_vectorizer() {
    let (_, store) = hash_store("NearText", false);
    store
        .add_texts(&["borrow checker", "garbage collector"], None, None, None)
        .unwrap();

    let docs = store
        .similarity_search("borrow checker", 1, &SearchOptions::new(SearchMode::Text))
        .unwrap();
    assert_eq!(docs[0].content, "borrow checker");
}

#[test]
fn test_text_mode_without_vectorizer_is_query_error() {
    let store = VectorStore::new(
        Arc::new(MemoryEngine::new()),
        StoreConfig::new("NoVectorizer", "text"),
        None,
    )
    .unwrap();
    store.add_texts(&["hello"], None, None, None).unwrap();

    let err = store
        .similarity_search("hello", 1, &SearchOptions::new(SearchMode::Text))
        .unwrap_err();
    assert!(matches!(err, StoreError::Query(_)));
}

#[test]
fn test_transport_errors_propagate_unchanged() {
    let engine = Arc::new(UnreachableEngine(MemoryEngine::new()));
    let store = VectorStore::new(engine, StoreConfig::new("Down", "text"), None).unwrap();

    let err = store
        .similarity_search("hello", 1, &SearchOptions::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::Engine(Error::Transport(_))));
}

#[test]
fn test_uuids_and_vectors_on_request() {
    let (_, store) = hash_store("Extras", false);
    let ids = store.add_texts(&["hello world"], None, None, None).unwrap();

    let options = SearchOptions::default().include_vector().return_uuids();
    let docs = store.similarity_search("hello", 1, &options).unwrap();
    assert_eq!(docs[0].uuid(), Some(ids[0].as_str()));
    assert_eq!(docs[0].vector().map(|v| v.len()), Some(semstore_core::DEFAULT_HASH_DIM));
}

#[test]
fn test_return_properties_always_include_text() {
    let (_, store) = hash_store("Projection", false);
    store
        .add_texts(
            &["hello"],
            Some(&[metadata(json!({"source": "x", "page": 3}))]),
            None,
            None,
        )
        .unwrap();

    let mut options = SearchOptions::default();
    options.params.return_properties = Some(vec!["page".to_string()]);
    let docs = store.similarity_search("hello", 1, &options).unwrap();
    assert_eq!(docs[0].content, "hello");
    assert_eq!(docs[0].metadata.get("page"), Some(&json!(3)));
    assert!(!docs[0].metadata.contains_key("source"));
}

#[test]
fn test_filtered_search() {
    let (_, store) = hash_store("Filtered", false);
    store
        .add_texts(
            &["rust book", "rust blog"],
            Some(&[metadata(json!({"kind": "book"})), metadata(json!({"kind": "blog"}))]),
            None,
            None,
        )
        .unwrap();

    let options = SearchOptions::default().with_filter(FilterCondition::equals("kind", "blog"));
    let docs = store.similarity_search("rust", 5, &options).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "rust blog");
}

#[test]
fn test_relevance_scores_in_unit_interval() {
    let (_, store) = hash_store("Relevance", false);
    store
        .add_texts(&["alpha beta", "gamma delta", "alpha gamma"], None, None, None)
        .unwrap();

    let hits = store
        .similarity_search_with_relevance_scores("alpha", 3, &SearchOptions::default())
        .unwrap();
    assert!(!hits.is_empty());
    for (_, score) in &hits {
        assert!((0.0..=1.0).contains(score));
    }

    let store = store.with_relevance_score_fn(|_| 0.25);
    let hits = store
        .similarity_search_with_relevance_scores("alpha", 1, &SearchOptions::default())
        .unwrap();
    assert_eq!(hits[0].1, 0.25);
}

#[test]
fn test_mmr_skips_near_duplicates() {
    let store = mmr_store();

    let relevant = store
        .max_marginal_relevance_search("query", 2, 3, 1.0, &SearchOptions::default())
        .unwrap();
    let contents: Vec<&str> = relevant.iter().map(|d| d.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "first again"]);

    let diverse = store
        .max_marginal_relevance_search("query", 2, 3, 0.5, &SearchOptions::default())
        .unwrap();
    let contents: Vec<&str> = diverse.iter().map(|d| d.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "something else"]);

    for doc in relevant.iter().chain(&diverse) {
        assert!(!doc.metadata.contains_key(VECTOR_KEY));
    }
}

#[test]
fn test_mmr_argument_checks() {
    let store = mmr_store();
    let options = SearchOptions::default();

    let err = store
        .max_marginal_relevance_search("query", 2, 3, 1.5, &options)
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    let err = store
        .max_marginal_relevance_search("query", 4, 2, 0.5, &options)
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    let no_embedder = VectorStore::new(
        Arc::new(MemoryEngine::new()),
        StoreConfig::new("NoEmbedder", "text"),
        None,
    )
    .unwrap();
    let err = no_embedder
        .max_marginal_relevance_search("query", 1, 2, 0.5, &options)
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));
}

#[test]
fn test_delete_by_ids() {
    let (engine, store) = hash_store("Deletes", false);
    let ids = store.add_texts(&["keep me", "drop me"], None, None, None).unwrap();

    let err = store.delete(None, None).unwrap_err();
    assert!(matches!(err, StoreError::Configuration(msg) if msg == "No ids provided to delete."));

    let removed = store.delete(Some(&ids[1..]), None).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(engine.get_collection("Deletes").unwrap().count(), 1);

    let docs = store.similarity_search("drop me", 5, &SearchOptions::default()).unwrap();
    assert!(docs.iter().all(|d| d.content != "drop me"));
}

#[test]
fn test_from_texts_with_tenant() {
    let embedding: Arc<dyn Embeddings> = Arc::new(HashEmbeddings::default());
    let store = VectorStore::from_texts(
        Arc::new(MemoryEngine::new()),
        &["one", "two"],
        embedding,
        Some(&[metadata(json!({"page": 1})), metadata(json!({"page": 2}))]),
        Some("acme"),
        StoreConfig::new("FromTexts", "text"),
    )
    .unwrap();

    assert!(store.multi_tenancy_enabled());
    assert_eq!(store.query_attrs(), &["text".to_string(), "page".to_string()]);
    assert!(store.tenant_exists("acme").unwrap());

    let docs = store
        .similarity_search("one", 2, &SearchOptions::default().with_tenant("acme"))
        .unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn test_add_documents() {
    let (_, store) = hash_store("Documents", false);
    let doc = Document::new("from a document").with_metadata(metadata(json!({"lang": "en"})));
    let ids = store.add_documents(&[doc], None, None).unwrap();
    assert_eq!(ids.len(), 1);

    let docs = store.similarity_search("document", 1, &SearchOptions::default()).unwrap();
    assert_eq!(docs[0].metadata.get("lang"), Some(&json!("en")));
}

#[test]
fn test_config_file_drives_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, r#"{"index_name": "FromFile", "text_key": "body"}"#).unwrap();

    let config = StoreConfig::from_json_file(&path).unwrap();
    let store = VectorStore::new(Arc::new(MemoryEngine::new()), config, None).unwrap();
    assert_eq!(store.index_name(), "FromFile");
    assert_eq!(store.text_key(), "body");
}

#[test]
fn test_configuration_checked_before_embedding() {
    let embedding = Arc::new(CountingEmbeddings::default());
    let store = VectorStore::new(
        Arc::new(MemoryEngine::new()),
        StoreConfig::new("Preflight", "text").with_multi_tenancy(true),
        Some(embedding.clone()),
    )
    .unwrap();
    let options = SearchOptions::default();

    let err = store.similarity_search("q", 1, &options).unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    let err = store
        .max_marginal_relevance_search("q", 1, 4, 0.5, &options)
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    let scoped = SearchOptions::default().with_tenant("acme");
    let err = store
        .max_marginal_relevance_search("q", 1, 4, 2.0, &scoped)
        .unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    let err = store.add_texts(&["q"], None, None, None).unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));

    assert_eq!(embedding.calls(), 0);
}

#[test]
fn test_reserved_keys_only_when_requested() {
    let (_, store) = hash_store("Reserved", false);
    let ids = store
        .add_texts(
            &["hello"],
            Some(&[metadata(json!({"source": "x", "vector": "caller", "uuid": "caller-id"}))]),
            None,
            None,
        )
        .unwrap();

    let docs = store.similarity_search("hello", 1, &SearchOptions::default()).unwrap();
    assert_eq!(docs[0].metadata.get("source"), Some(&json!("x")));
    assert!(!docs[0].metadata.contains_key(VECTOR_KEY));
    assert!(!docs[0].metadata.contains_key(UUID_KEY));

    let options = SearchOptions::default().return_uuids();
    let docs = store.similarity_search("hello", 1, &options).unwrap();
    assert_eq!(docs[0].uuid(), Some(ids[0].as_str()));

    let docs = store
        .max_marginal_relevance_search("hello", 1, 2, 0.5, &SearchOptions::default())
        .unwrap();
    assert_eq!(docs[0].content, "hello");
    assert!(!docs[0].metadata.contains_key(VECTOR_KEY));
}

#[test]
fn test_concurrent_tenant_creation_tolerated() {
    let engine = Arc::new(RacingTenantEngine(MemoryEngine::new()));
    let store = VectorStore::new(
        engine.clone(),
        StoreConfig::new("Racing", "text").with_multi_tenancy(true),
        Some(Arc::new(HashEmbeddings::default())),
    )
    .unwrap();

    let ids = store.add_texts(&["first write"], None, None, Some("acme")).unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(engine.0.get_collection("Racing").unwrap().count(), 1);
}
