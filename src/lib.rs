//! # semstore
//!
//! A tenant-aware vector store adapter over a search engine.
//!
//! semstore turns an engine collection into a store of text documents:
//! texts go in with their metadata and embeddings, and come back out of
//! hybrid, vector or text queries as [`Document`]s with optional scores.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! semstore --input docs.jsonl --query "ownership rules" -k 4
//! semstore --input docs.jsonl --query "ownership rules" --mmr --fetch-k 20 --lambda 0.5
//! ```
//!
//! ### As a library
//!
//! ```rust
//! use semstore::prelude::*;
//! use std::sync::Arc;
//!
//! let engine = Arc::new(MemoryEngine::new());
//! let embedding: Arc<dyn Embeddings> = Arc::new(HashEmbeddings::default());
//!
//! let store = VectorStore::from_texts(
//!     engine,
//!     &["the borrow checker", "a tracing garbage collector", "lifetimes and borrows"],
//!     embedding,
//!     None,
//!     None,
//!     StoreConfig::new("Notes", "text"),
//! )
//! .unwrap();
//!
//! let hits = store
//!     .similarity_search_with_score("borrow", 2, &SearchOptions::default())
//!     .unwrap();
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! ## Crate Structure
//!
//! - [`semstore-core`](https://docs.rs/semstore-core) - Documents, scores, filters, MMR and the engine traits
//! - [`semstore-engine`](https://docs.rs/semstore-engine) - In-memory engine with BM25 and hybrid fusion
//! - [`semstore-store`](https://docs.rs/semstore-store) - The vector store: ingestion, search, tenants
//!
//! ## Features
//!
//! - **Batched ingestion**: per-object failures are logged, the batch goes on
//! - **Three search modes**: hybrid, near-vector and near-text
//! - **MMR re-ranking**: relevant but non-redundant results
//! - **Multi-tenancy**: every engine call scoped to the right tenant

// Re-export core types
pub use semstore_core::{
    cosine_similarity, normalize_score, select_diverse, Document, Embeddings, FilterCondition,
    HashEmbeddings, Metadata, Score, SearchEngine,
};

// Re-export the engine
pub use semstore_engine::MemoryEngine;

// Re-export the store
pub use semstore_store::{
    IngestReport, QueryParams, SearchMode, SearchOptions, SearchResult, StoreConfig, StoreError,
    VectorStore,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Document, Embeddings, FilterCondition, HashEmbeddings, MemoryEngine, Metadata, Score,
        SearchEngine, SearchMode, SearchOptions, StoreConfig, StoreError, VectorStore,
    };
}
