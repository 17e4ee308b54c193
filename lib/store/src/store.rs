use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use semstore_core::{
    default_relevance_score_fn, CollectionSchema, Embeddings, FilterCondition, Metadata,
    RelevanceScoreFn, SearchEngine,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// A collection in a search engine, seen as a store of text documents.
///
/// Bound to one collection and one text key for its whole life. The
/// multi-tenancy flag is read from the engine once, at construction.
pub struct VectorStore {
    pub(crate) engine: Arc<dyn SearchEngine>,
    pub(crate) index_name: String,
    pub(crate) text_key: String,
    pub(crate) query_attrs: Vec<String>,
    pub(crate) embedding: Option<Arc<dyn Embeddings>>,
    pub(crate) relevance_score_fn: RelevanceScoreFn,
    pub(crate) multi_tenancy_enabled: bool,
    pub(crate) batch_size: usize,
    pub(crate) default_alpha: f32,
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("index_name", &self.index_name)
            .field("text_key", &self.text_key)
            .field("query_attrs", &self.query_attrs)
            .field("has_embedding", &self.embedding.is_some())
            .field("multi_tenancy_enabled", &self.multi_tenancy_enabled)
            .finish()
    }
}

impl VectorStore {
    /// Connect to (and if needed create) the configured collection.
    pub fn new(
        engine: Arc<dyn SearchEngine>,
        config: StoreConfig,
        embedding: Option<Arc<dyn Embeddings>>,
    ) -> Result<Self> {
        config.validate()?;

        let index_name = if config.index_name.is_empty() {
            format!("Store_{}", Uuid::new_v4().simple())
        } else {
            config.index_name
        };

        if !engine.collection_exists(&index_name)? {
            info!(collection = %index_name, multi_tenancy = config.use_multi_tenancy, "creating collection");
            engine.create_collection(&CollectionSchema::new(&index_name, config.use_multi_tenancy))?;
        }

        // Read once; the engine does not allow changing it afterwards
        let multi_tenancy_enabled = engine.collection_config(&index_name)?.multi_tenancy;

        let mut query_attrs = vec![config.text_key.clone()];
        query_attrs.extend(config.attributes);

        Ok(Self {
            engine,
            index_name,
            text_key: config.text_key,
            query_attrs,
            embedding,
            relevance_score_fn: default_relevance_score_fn(),
            multi_tenancy_enabled,
            batch_size: config.batch_size,
            default_alpha: config.default_alpha,
        })
    }

    /// Create a store and ingest `texts` in one go.
    ///
    /// Multi-tenancy is enabled iff `tenant` is given; attributes are taken
    /// from the keys of the first metadata map.
    pub fn from_texts<S: AsRef<str>>(
        engine: Arc<dyn SearchEngine>,
        texts: &[S],
        embedding: Arc<dyn Embeddings>,
        metadatas: Option<&[Metadata]>,
        tenant: Option<&str>,
        config: StoreConfig,
    ) -> Result<Self> {
        let attributes = metadatas
            .and_then(|m| m.first())
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();

        let config = StoreConfig {
            attributes,
            use_multi_tenancy: tenant.is_some(),
            ..config
        };

        let store = Self::new(engine, config, Some(embedding))?;
        store.add_texts(texts, metadatas, None, tenant)?;
        Ok(store)
    }

    /// Replace the raw-score to relevance mapping
    #[must_use]
    pub fn with_relevance_score_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        self.relevance_score_fn = Arc::new(f);
        self
    }

    pub fn embeddings(&self) -> Option<&Arc<dyn Embeddings>> {
        self.embedding.as_ref()
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn text_key(&self) -> &str {
        &self.text_key
    }

    /// The text key followed by the configured attributes
    pub fn query_attrs(&self) -> &[String] {
        &self.query_attrs
    }

    pub fn multi_tenancy_enabled(&self) -> bool {
        self.multi_tenancy_enabled
    }

    pub fn relevance_score_fn(&self) -> &RelevanceScoreFn {
        &self.relevance_score_fn
    }

    /// Delete objects by id, returning how many the engine removed
    pub fn delete(&self, ids: Option<&[String]>, tenant: Option<&str>) -> Result<usize> {
        let ids = ids.ok_or_else(|| StoreError::config("No ids provided to delete."))?;
        let filter = FilterCondition::by_ids(ids.iter().cloned());

        let collection = self.with_tenant(tenant)?;
        Ok(collection.delete_many(&filter)?)
    }
}
