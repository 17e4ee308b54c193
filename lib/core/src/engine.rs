//! Search engine client capability
//!
//! The remote engine owns storage, indexing and scoring. The store only
//! issues the requests below and consumes typed responses.

use crate::document::Metadata;
use crate::error::Result;
use crate::filter::FilterCondition;
use serde::{Deserialize, Serialize};

/// Data type of a schema property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: PropertyType,
}

/// Collection definition sent on creation and read back as config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub properties: Vec<PropertySchema>,
    #[serde(rename = "multiTenancy", default)]
    pub multi_tenancy: bool,
}

impl CollectionSchema {
    /// Default schema: a single `text` property
    pub fn new(name: impl Into<String>, multi_tenancy: bool) -> Self {
        Self {
            name: name.into(),
            properties: vec![PropertySchema {
                name: "text".to_string(),
                data_type: PropertyType::Text,
            }],
            multi_tenancy,
        }
    }
}

/// One object in a batch write
#[derive(Debug, Clone, PartialEq)]
pub struct BatchObject {
    pub id: String,
    pub properties: Metadata,
    pub vector: Option<Vec<f32>>,
    pub tenant: Option<String>,
}

/// An object the engine rejected during a batch write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedObject {
    pub original_id: String,
    pub message: String,
}

/// What to search with
#[derive(Debug, Clone, PartialEq)]
pub enum QueryKind {
    /// Keyword scoring fused with vector scoring when `vector` is given
    Hybrid {
        query: String,
        vector: Option<Vec<f32>>,
        alpha: f32,
    },
    NearVector {
        vector: Vec<f32>,
    },
    /// Engine-side vectorization of `query`
    NearText {
        query: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub kind: QueryKind,
    pub limit: usize,
    pub filter: Option<FilterCondition>,
    pub include_vector: bool,
    /// `None` returns every property
    pub return_properties: Option<Vec<String>>,
}

impl Query {
    pub fn new(kind: QueryKind, limit: usize) -> Self {
        Self {
            kind,
            limit,
            filter: None,
            include_vector: false,
            return_properties: None,
        }
    }
}

/// Engine-computed metadata for a query hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub score: Option<f32>,
    pub explain_score: Option<String>,
    pub distance: Option<f32>,
    pub certainty: Option<f32>,
}

impl ObjectMetadata {
    /// Non-null fields as `(key, value)` pairs
    pub fn fields(&self) -> Vec<(&'static str, serde_json::Value)> {
        let mut fields = Vec::new();
        if let Some(score) = self.score {
            fields.push(("score", serde_json::Value::from(score)));
        }
        if let Some(explain) = &self.explain_score {
            fields.push(("explain_score", serde_json::Value::from(explain.clone())));
        }
        if let Some(distance) = self.distance {
            fields.push(("distance", serde_json::Value::from(distance)));
        }
        if let Some(certainty) = self.certainty {
            fields.push(("certainty", serde_json::Value::from(certainty)));
        }
        fields
    }
}

/// A query hit
#[derive(Debug, Clone, PartialEq)]
pub struct QueryObject {
    pub id: String,
    pub properties: Metadata,
    pub metadata: ObjectMetadata,
    pub vector: Option<Vec<f32>>,
}

/// Operations the store needs from a search engine.
///
/// `tenant` must be `Some` exactly when the collection is multi-tenant.
pub trait SearchEngine: Send + Sync {
    fn collection_exists(&self, name: &str) -> Result<bool>;

    fn create_collection(&self, schema: &CollectionSchema) -> Result<()>;

    /// Current configuration of an existing collection
    fn collection_config(&self, name: &str) -> Result<CollectionSchema>;

    fn list_tenants(&self, collection: &str) -> Result<Vec<String>>;

    /// Fails with [`crate::Error::TenantExists`] for a name already present
    fn create_tenants(&self, collection: &str, tenants: &[String]) -> Result<()>;

    /// Write every object, returning the ones that failed.
    ///
    /// A failed object never aborts its siblings; `Err` means the batch as a
    /// whole could not be submitted.
    fn batch_write(&self, collection: &str, objects: Vec<BatchObject>) -> Result<Vec<FailedObject>>;

    fn query(&self, collection: &str, tenant: Option<&str>, query: &Query) -> Result<Vec<QueryObject>>;

    /// Delete matching objects, returning how many were removed
    fn delete_many(&self, collection: &str, tenant: Option<&str>, filter: &FilterCondition) -> Result<usize>;
}
