//! Search dispatch
//!
//! One entry point, [`VectorStore::search`], turns a query and a
//! [`SearchMode`] into the matching engine request and normalizes the hits
//! into [`Document`]s. The other search methods are thin wrappers.

use crate::error::{Result, StoreError};
use crate::store::VectorStore;
use semstore_core::{
    document::vector_to_value, select_diverse, Document, Error, FilterCondition, Query, QueryKind,
    QueryObject, Score, UUID_KEY, VECTOR_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

/// Retrieval strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Keyword scoring fused with the query embedding
    #[default]
    Hybrid,
    /// Nearest neighbours of a caller-supplied vector
    Vector,
    /// Engine-side vectorization of the query text
    Text,
}

impl FromStr for SearchMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hybrid" => Ok(SearchMode::Hybrid),
            "vector" | "near_vector" => Ok(SearchMode::Vector),
            "text" | "near_text" => Ok(SearchMode::Text),
            other => Err(StoreError::config(format!("Invalid search method: {other}"))),
        }
    }
}

/// Engine-level knobs passed through with a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub filter: Option<FilterCondition>,
    /// Hybrid vector weight; the store default when `None`
    pub alpha: Option<f32>,
    /// Query vector for [`SearchMode::Vector`]
    pub near_vector: Option<Vec<f32>>,
    /// Attach each hit's embedding under [`VECTOR_KEY`]
    pub include_vector: bool,
    /// Attach each hit's id under [`UUID_KEY`]
    pub return_uuids: bool,
    /// Restrict returned properties; the text key is always added
    pub return_properties: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub mode: SearchMode,
    /// Replaces the keyword side of a hybrid query
    pub keyword_query: Option<String>,
    pub tenant: Option<String>,
    pub params: QueryParams,
}

impl SearchOptions {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    #[must_use]
    pub fn with_keyword_query(mut self, keyword_query: impl Into<String>) -> Self {
        self.keyword_query = Some(keyword_query.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterCondition) -> Self {
        self.params.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_near_vector(mut self, vector: Vec<f32>) -> Self {
        self.params.near_vector = Some(vector);
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.params.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn include_vector(mut self) -> Self {
        self.params.include_vector = true;
        self
    }

    #[must_use]
    pub fn return_uuids(mut self) -> Self {
        self.params.return_uuids = true;
        self
    }
}

/// A hit with its score when one was requested
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub document: Document,
    pub score: Option<Score>,
}

impl VectorStore {
    /// Run a query in the given mode and normalize the hits.
    ///
    /// Mode and argument problems fail with [`StoreError::Configuration`]
    /// before the engine is contacted. Engine query failures come back as
    /// [`StoreError::Query`]; transport failures as [`StoreError::Engine`].
    pub fn search(
        &self,
        query: Option<&str>,
        k: usize,
        options: &SearchOptions,
        return_score: bool,
    ) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(StoreError::config("k must be at least 1"));
        }
        let params = &options.params;
        let alpha = params.alpha.unwrap_or(self.default_alpha);
        if !(0.0..=1.0).contains(&alpha) {
            return Err(StoreError::config(format!("alpha must be in [0, 1], got {alpha}")));
        }
        self.check_tenant(options.tenant.as_deref())?;

        let kind = match options.mode {
            SearchMode::Hybrid => {
                let query = query
                    .ok_or_else(|| StoreError::config("hybrid search requires a query string"))?;
                let vector = match &self.embedding {
                    Some(embedding) => Some(
                        embedding
                            .embed_query(query)
                            .map_err(|e| StoreError::Embedding(e.to_string()))?,
                    ),
                    None => None,
                };
                QueryKind::Hybrid {
                    query: options.keyword_query.clone().unwrap_or_else(|| query.to_string()),
                    vector,
                    alpha,
                }
            }
            SearchMode::Vector => {
                let vector = params.near_vector.clone().ok_or_else(|| {
                    StoreError::config("vector search requires a query vector or an embedding provider")
                })?;
                QueryKind::NearVector { vector }
            }
            SearchMode::Text => {
                let query = query
                    .ok_or_else(|| StoreError::config("text search requires a query string"))?;
                QueryKind::NearText {
                    query: query.to_string(),
                }
            }
        };

        let return_properties = params.return_properties.clone().map(|mut props| {
            if !props.contains(&self.text_key) {
                props.push(self.text_key.clone());
            }
            props
        });

        let request = Query {
            kind,
            limit: k,
            filter: params.filter.clone(),
            include_vector: params.include_vector,
            return_properties,
        };

        let objects = {
            let collection = self.with_tenant(options.tenant.as_deref())?;
            collection.query(&request).map_err(|e| match e {
                Error::Transport(_) => StoreError::Engine(e),
                other => StoreError::Query(other.to_string()),
            })?
        };
        debug!(collection = %self.index_name, mode = ?options.mode, hits = objects.len(), "search done");

        objects
            .into_iter()
            .map(|object| self.normalize(object, params.return_uuids, return_score))
            .collect()
    }

    /// Promote the text property to content and merge the rest into metadata
    fn normalize(&self, object: QueryObject, return_uuids: bool, return_score: bool) -> Result<SearchResult> {
        let QueryObject {
            id,
            mut properties,
            metadata,
            vector,
        } = object;

        let content = match properties.remove(&self.text_key) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => {
                return Err(StoreError::Query(format!(
                    "object {id} has no {} property",
                    self.text_key
                )))
            }
        };

        // Reserved keys only ever carry what was requested for this query
        properties.retain(|k, v| !v.is_null() && k != VECTOR_KEY && k != UUID_KEY);
        for (key, value) in metadata.fields() {
            properties.insert(key.to_string(), value);
        }
        if let Some(vector) = &vector {
            properties.insert(VECTOR_KEY.to_string(), vector_to_value(vector));
        }
        if return_uuids {
            properties.insert(UUID_KEY.to_string(), Value::String(id));
        }

        let score = return_score.then(|| {
            Score::new(
                metadata.score.unwrap_or(0.0),
                metadata.explain_score.clone().unwrap_or_default(),
            )
        });

        Ok(SearchResult {
            document: Document {
                content,
                metadata: properties,
            },
            score,
        })
    }

    /// Documents most similar to `query`
    pub fn similarity_search(&self, query: &str, k: usize, options: &SearchOptions) -> Result<Vec<Document>> {
        Ok(self
            .search(Some(query), k, options, false)?
            .into_iter()
            .map(|r| r.document)
            .collect())
    }

    /// Documents with the engine score and its explanation
    pub fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
        options: &SearchOptions,
    ) -> Result<Vec<(Document, Score)>> {
        Ok(self
            .search(Some(query), k, options, true)?
            .into_iter()
            .map(|r| {
                let score = r.score.unwrap_or_else(|| Score::new(0.0, ""));
                (r.document, score)
            })
            .collect())
    }

    /// Documents with scores mapped through the relevance function into `[0, 1]`
    pub fn similarity_search_with_relevance_scores(
        &self,
        query: &str,
        k: usize,
        options: &SearchOptions,
    ) -> Result<Vec<(Document, f32)>> {
        let relevance = self.relevance_score_fn.as_ref();
        Ok(self
            .similarity_search_with_score(query, k, options)?
            .into_iter()
            .map(|(doc, score)| (doc, relevance(score.value)))
            .collect())
    }

    /// Documents nearest to `embedding`
    pub fn similarity_search_by_vector(
        &self,
        embedding: &[f32],
        k: usize,
        options: &SearchOptions,
    ) -> Result<Vec<Document>> {
        let options = SearchOptions {
            mode: SearchMode::Vector,
            ..options.clone()
        }
        .with_near_vector(embedding.to_vec());

        Ok(self
            .search(None, k, &options, false)?
            .into_iter()
            .map(|r| r.document)
            .collect())
    }

    /// Relevant yet diverse documents for `query`, see
    /// [`VectorStore::max_marginal_relevance_search_by_vector`]
    pub fn max_marginal_relevance_search(
        &self,
        query: &str,
        k: usize,
        fetch_k: usize,
        lambda_mult: f32,
        options: &SearchOptions,
    ) -> Result<Vec<Document>> {
        check_mmr_args(k, fetch_k, lambda_mult)?;
        self.check_tenant(options.tenant.as_deref())?;
        let embedding = self.embedding.as_ref().ok_or_else(|| {
            StoreError::config("max_marginal_relevance_search requires an embedding provider")
        })?;
        let vector = embedding
            .embed_query(query)
            .map_err(|e| StoreError::Embedding(e.to_string()))?;

        self.max_marginal_relevance_search_by_vector(&vector, k, fetch_k, lambda_mult, options)
    }

    /// Fetch `fetch_k` nearest candidates, keep `k` of them by Maximal
    /// Marginal Relevance.
    ///
    /// `lambda_mult` in `[0, 1]`: 1 favours relevance, 0 diversity. Vectors
    /// are used for re-ranking only and never returned.
    pub fn max_marginal_relevance_search_by_vector(
        &self,
        embedding: &[f32],
        k: usize,
        fetch_k: usize,
        lambda_mult: f32,
        options: &SearchOptions,
    ) -> Result<Vec<Document>> {
        check_mmr_args(k, fetch_k, lambda_mult)?;

        let mut options = SearchOptions {
            mode: SearchMode::Vector,
            ..options.clone()
        }
        .with_near_vector(embedding.to_vec());
        options.params.include_vector = true;

        let mut candidates: Vec<Option<Document>> = self
            .search(None, fetch_k, &options, false)?
            .into_iter()
            .map(|r| Some(r.document))
            .collect();

        let vectors: Vec<Vec<f32>> = candidates
            .iter()
            .map(|doc| doc.as_ref().and_then(Document::vector).unwrap_or_default())
            .collect();

        let selected = select_diverse(embedding, &vectors, k, fetch_k, lambda_mult);

        Ok(selected
            .into_iter()
            .filter_map(|idx| candidates[idx].take())
            .map(|mut doc| {
                doc.take_vector();
                doc
            })
            .collect())
    }
}

fn check_mmr_args(k: usize, fetch_k: usize, lambda_mult: f32) -> Result<()> {
    if k == 0 {
        return Err(StoreError::config("k must be at least 1"));
    }
    if !(0.0..=1.0).contains(&lambda_mult) {
        return Err(StoreError::config(format!(
            "lambda_mult must be in [0, 1], got {lambda_mult}"
        )));
    }
    if fetch_k < k {
        return Err(StoreError::config(format!(
            "fetch_k ({fetch_k}) must be at least k ({k})"
        )));
    }
    Ok(())
}
