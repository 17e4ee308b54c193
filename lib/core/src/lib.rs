//! # semstore Core
//!
//! Shared building blocks for the semstore vector store adapter.
//!
//! - [`Document`] - text content plus metadata, the unit callers see
//! - [`Score`] and [`normalize_score`] - engine scores and their `[0, 1]` relevance
//! - [`select_diverse`] - Maximal Marginal Relevance re-ranking
//! - [`FilterCondition`] - property and id filters
//! - [`Embeddings`] - text to vector capability
//! - [`SearchEngine`] - the engine client capability
//!
//! ## Example
//!
//! ```rust
//! use semstore_core::select_diverse;
//!
//! let query = vec![1.0, 0.0, 0.0];
//! let candidates = vec![
//!     vec![0.9, 0.1, 0.0],
//!     vec![0.89, 0.11, 0.0], // near-duplicate of the first
//!     vec![0.5, 0.0, 0.5],
//! ];
//! let picked = select_diverse(&query, &candidates, 2, 3, 0.5);
//! assert_eq!(picked, vec![0, 2]);
//! ```

pub mod document;
pub mod embeddings;
pub mod engine;
pub mod error;
pub mod filter;
pub mod mmr;
pub mod score;
pub mod vector;

pub use document::{Document, Metadata, UUID_KEY, VECTOR_KEY};
pub use embeddings::{Embeddings, HashEmbeddings, DEFAULT_HASH_DIM};
pub use engine::{
    BatchObject, CollectionSchema, FailedObject, ObjectMetadata, PropertySchema, PropertyType,
    Query, QueryKind, QueryObject, SearchEngine,
};
pub use error::{Error, Result};
pub use filter::FilterCondition;
pub use mmr::select_diverse;
pub use score::{default_relevance_score_fn, normalize_score, RelevanceScoreFn, Score};
pub use vector::{cosine_similarity, Vector};
