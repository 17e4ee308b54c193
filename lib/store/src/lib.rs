//! # semstore Store
//!
//! [`VectorStore`] presents one engine collection as a store of text
//! documents: batched ingestion that survives per-object failures, hybrid,
//! vector and text search normalized to [`Document`]s, MMR re-ranking and
//! tenant scoping.
//!
//! ```rust
//! use semstore_core::HashEmbeddings;
//! use semstore_engine::MemoryEngine;
//! use semstore_store::{SearchOptions, StoreConfig, VectorStore};
//! use std::sync::Arc;
//!
//! let engine = Arc::new(MemoryEngine::new());
//! let store = VectorStore::new(
//!     engine,
//!     StoreConfig::new("Articles", "text"),
//!     Some(Arc::new(HashEmbeddings::default())),
//! )
//! .unwrap();
//!
//! let ids = store.add_texts(&["rust ownership", "garbage collection"], None, None, None).unwrap();
//! assert_eq!(ids.len(), 2);
//!
//! let docs = store.similarity_search("ownership", 1, &SearchOptions::default()).unwrap();
//! assert_eq!(docs[0].content, "rust ownership");
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod search;
pub mod store;
pub mod tenant;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use ingest::IngestReport;
pub use search::{QueryParams, SearchMode, SearchOptions, SearchResult};
pub use semstore_core::{Document, Score};
pub use store::VectorStore;
pub use tenant::CollectionHandle;
