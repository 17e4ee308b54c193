use crate::collection::Collection;
use parking_lot::RwLock;
use semstore_core::{
    BatchObject, CollectionSchema, Embeddings, Error, FailedObject, FilterCondition, Query,
    QueryKind, QueryObject, Result, SearchEngine,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// In-process search engine holding every collection in memory
#[derive(Default)]
pub struct MemoryEngine {
    collections: RwLock<HashMap<String, Arc<Collection>>>,
    vectorizer: Option<Arc<dyn Embeddings>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine-side vectorizer used by near-text queries
    #[must_use]
    pub fn with_vectorizer(mut self, vectorizer: Arc<dyn Embeddings>) -> Self {
        self.vectorizer = Some(vectorizer);
        self
    }

    #[inline]
    pub fn get_collection(&self, name: &str) -> Option<Arc<Collection>> {
        self.collections.read().get(name).cloned()
    }

    #[inline]
    #[must_use]
    pub fn list_collections(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }

    fn collection(&self, name: &str) -> Result<Arc<Collection>> {
        self.get_collection(name)
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }
}

impl SearchEngine for MemoryEngine {
    fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.read().contains_key(name))
    }

    fn create_collection(&self, schema: &CollectionSchema) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(&schema.name) {
            return Err(Error::CollectionExists(schema.name.clone()));
        }
        debug!(collection = %schema.name, multi_tenancy = schema.multi_tenancy, "creating collection");
        collections.insert(schema.name.clone(), Arc::new(Collection::new(schema.clone())));
        Ok(())
    }

    fn collection_config(&self, name: &str) -> Result<CollectionSchema> {
        Ok(self.collection(name)?.schema().clone())
    }

    fn list_tenants(&self, collection: &str) -> Result<Vec<String>> {
        self.collection(collection)?.tenants()
    }

    fn create_tenants(&self, collection: &str, tenants: &[String]) -> Result<()> {
        self.collection(collection)?.create_tenants(tenants)
    }

    fn batch_write(&self, collection: &str, objects: Vec<BatchObject>) -> Result<Vec<FailedObject>> {
        let collection = self.collection(collection)?;
        let submitted = objects.len();
        let failed = collection.batch_write(objects);
        debug!(
            collection = collection.name(),
            submitted,
            failed = failed.len(),
            "batch written"
        );
        Ok(failed)
    }

    fn query(&self, collection: &str, tenant: Option<&str>, query: &Query) -> Result<Vec<QueryObject>> {
        let collection = self.collection(collection)?;
        let near_text_vector = match &query.kind {
            QueryKind::NearText { query: text } => {
                let vectorizer = self.vectorizer.as_ref().ok_or_else(|| {
                    Error::Query(format!(
                        "near_text on {} requires a vectorizer module",
                        collection.name()
                    ))
                })?;
                Some(vectorizer.embed_query(text)?)
            }
            _ => None,
        };
        collection.query(tenant, query, near_text_vector.as_deref())
    }

    fn delete_many(&self, collection: &str, tenant: Option<&str>, filter: &FilterCondition) -> Result<usize> {
        self.collection(collection)?.delete_many(tenant, filter)
    }
}
