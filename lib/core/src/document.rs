use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-defined properties attached to a document
pub type Metadata = serde_json::Map<String, Value>;

/// Metadata key holding the dense embedding, present only when requested
pub const VECTOR_KEY: &str = "vector";

/// Metadata key holding the object id, present only when requested
pub const UUID_KEY: &str = "uuid";

/// A piece of text with its metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(alias = "page_content")]
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    #[inline]
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Object id, if it was requested at query time
    pub fn uuid(&self) -> Option<&str> {
        self.metadata.get(UUID_KEY).and_then(Value::as_str)
    }

    /// Embedding, if it was requested at query time
    pub fn vector(&self) -> Option<Vec<f32>> {
        vector_from_value(self.metadata.get(VECTOR_KEY)?)
    }

    /// Remove and return the embedding
    pub fn take_vector(&mut self) -> Option<Vec<f32>> {
        let value = self.metadata.remove(VECTOR_KEY)?;
        vector_from_value(&value)
    }
}

/// Encode an embedding as a metadata value
pub fn vector_to_value(vector: &[f32]) -> Value {
    Value::Array(vector.iter().map(|&x| Value::from(x)).collect())
}

/// Decode an embedding stored as a metadata value.
/// Returns `None` unless every element is numeric.
pub fn vector_from_value(value: &Value) -> Option<Vec<f32>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_f64().map(|x| x as f32))
        .collect()
}
