//! # semstore Engine
//!
//! An in-process implementation of [`semstore_core::SearchEngine`].
//!
//! [`MemoryEngine`] keeps collections, tenants and objects in memory and
//! answers hybrid, near-vector and near-text queries. It backs the
//! `semstore` CLI and the test suites; production deployments plug a remote
//! engine client into the same trait.
//!
//! ## Example
//!
//! ```rust
//! use semstore_core::{CollectionSchema, SearchEngine};
//! use semstore_engine::MemoryEngine;
//!
//! let engine = MemoryEngine::new();
//! engine.create_collection(&CollectionSchema::new("Docs", false)).unwrap();
//! assert!(engine.collection_exists("Docs").unwrap());
//! ```

pub mod bm25;
pub mod collection;
pub mod engine;
pub mod fusion;

pub use bm25::Bm25Index;
pub use collection::{Collection, StoredObject};
pub use engine::MemoryEngine;
pub use fusion::{relative_score_fusion, ScoredHit};
