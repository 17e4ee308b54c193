//! Embedding provider capability
//!
//! Maps text to fixed-length vectors. The store calls
//! [`Embeddings::embed_documents`] once per ingestion batch and
//! [`Embeddings::embed_query`] once per query.

use crate::error::Result;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Text to vector capability
pub trait Embeddings: Send + Sync {
    /// Embed a batch of documents, one vector per input, same order
    fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query string
    fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}

/// Default dimension for [`HashEmbeddings`]
pub const DEFAULT_HASH_DIM: usize = 64;

/// Deterministic trigram + word hashing embedder.
///
/// No model, no network: texts sharing words and character trigrams land
/// close together. Useful for local runs and tests.
#[derive(Debug, Clone)]
pub struct HashEmbeddings {
    dim: usize,
}

impl HashEmbeddings {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in trigrams(&normalized) {
            vector[self.slot(&trigram)] += 1.0;
        }
        // Words contribute more than trigrams
        for word in normalized.split_whitespace() {
            vector[self.slot(word)] += 2.0;
        }

        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for v in &mut vector {
                *v /= magnitude;
            }
        }
        vector
    }

    fn slot<T: Hash + ?Sized>(&self, token: &T) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dim
    }
}

impl Default for HashEmbeddings {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIM)
    }
}

impl Embeddings for HashEmbeddings {
    fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }

    fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed(text))
    }
}

fn trigrams(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() < 3 {
        return if chars.is_empty() { Vec::new() } else { vec![s.to_string()] };
    }
    chars.windows(3).map(|w| w.iter().collect()).collect()
}
