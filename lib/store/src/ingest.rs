//! Batched ingestion
//!
//! Texts are embedded once per call, written in fixed-size batches, and
//! rejected objects are logged and reported instead of failing the call.

use crate::error::{Result, StoreError};
use crate::store::VectorStore;
use semstore_core::{BatchObject, Document, FailedObject, Metadata, UUID_KEY, VECTOR_KEY};
use serde_json::Value;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Outcome of an ingestion call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// One id per input text, in input order, including failed ones
    pub ids: Vec<String>,
    /// Objects the engine rejected
    pub failed: Vec<FailedObject>,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl VectorStore {
    /// Write `texts` with optional aligned metadata and ids.
    ///
    /// Returns one id per text, in order. An existing id is replaced. Partial
    /// failures are logged, not raised.
    pub fn add_texts<S: AsRef<str>>(
        &self,
        texts: &[S],
        metadatas: Option<&[Metadata]>,
        ids: Option<&[String]>,
        tenant: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(self.add_texts_with_report(texts, metadatas, ids, tenant)?.ids)
    }

    pub fn add_documents(
        &self,
        documents: &[Document],
        ids: Option<&[String]>,
        tenant: Option<&str>,
    ) -> Result<Vec<String>> {
        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let metadatas: Vec<Metadata> = documents.iter().map(|d| d.metadata.clone()).collect();
        self.add_texts(&texts, Some(&metadatas), ids, tenant)
    }

    /// Like [`VectorStore::add_texts`], also returning the rejected objects
    pub fn add_texts_with_report<S: AsRef<str>>(
        &self,
        texts: &[S],
        metadatas: Option<&[Metadata]>,
        ids: Option<&[String]>,
        tenant: Option<&str>,
    ) -> Result<IngestReport> {
        check_aligned("metadatas", metadatas.map(<[Metadata]>::len), texts.len())?;
        check_aligned("ids", ids.map(<[String]>::len), texts.len())?;

        let collection = self.with_tenant(tenant)?;
        if let Some(tenant) = tenant {
            self.ensure_tenant(tenant)?;
        }

        let texts: Vec<String> = texts.iter().map(|t| t.as_ref().to_string()).collect();
        let mut vectors: Vec<Option<Vec<f32>>> = match &self.embedding {
            Some(embedding) => {
                let vectors = embedding
                    .embed_documents(&texts)
                    .map_err(|e| StoreError::Embedding(e.to_string()))?;
                if vectors.len() != texts.len() {
                    return Err(StoreError::Embedding(format!(
                        "expected {} embeddings, got {}",
                        texts.len(),
                        vectors.len()
                    )));
                }
                vectors.into_iter().map(Some).collect()
            }
            None => vec![None; texts.len()],
        };

        let mut objects = Vec::with_capacity(texts.len());
        for (i, text) in texts.into_iter().enumerate() {
            let mut properties = Metadata::new();
            properties.insert(self.text_key.clone(), Value::String(text));
            if let Some(metadata) = metadatas.map(|m| &m[i]) {
                for (key, value) in metadata {
                    if key == &self.text_key {
                        warn!(key = %key, index = i, "metadata key collides with the text key, dropped");
                        continue;
                    }
                    if key == VECTOR_KEY || key == UUID_KEY {
                        warn!(key = %key, index = i, "metadata key is reserved, dropped");
                        continue;
                    }
                    properties.insert(key.clone(), value.clone());
                }
            }

            let id = match ids {
                Some(ids) => ids[i].clone(),
                None => Uuid::new_v4().to_string(),
            };

            objects.push(BatchObject {
                id,
                properties,
                vector: vectors[i].take(),
                tenant: None,
            });
        }

        let ids: Vec<String> = objects.iter().map(|o| o.id.clone()).collect();
        let mut failed = Vec::new();
        let mut pending = objects.into_iter().peekable();
        while pending.peek().is_some() {
            let batch: Vec<BatchObject> = pending.by_ref().take(self.batch_size).collect();
            debug!(collection = collection.collection(), size = batch.len(), "submitting batch");
            failed.extend(collection.batch_write(batch)?);
        }

        for obj in &failed {
            error!(id = %obj.original_id, reason = %obj.message, "Failed to add object");
        }

        Ok(IngestReport { ids, failed })
    }
}

fn check_aligned(name: &str, len: Option<usize>, expected: usize) -> Result<()> {
    match len {
        Some(len) if len != expected => Err(StoreError::config(format!(
            "{name} has {len} entries but there are {expected} texts"
        ))),
        _ => Ok(()),
    }
}
