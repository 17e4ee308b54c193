use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a [`crate::VectorStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Collection name; empty generates `Store_<uuid>`
    pub index_name: String,
    /// Property holding the document text
    pub text_key: String,
    /// Extra metadata keys callers expect back
    pub attributes: Vec<String>,
    /// Create the collection as multi-tenant when it does not exist yet
    pub use_multi_tenancy: bool,
    /// Objects per engine batch request
    pub batch_size: usize,
    /// Weight of the vector side in hybrid queries
    pub default_alpha: f32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            index_name: String::new(),
            text_key: "text".to_string(),
            attributes: Vec::new(),
            use_multi_tenancy: false,
            batch_size: 100,
            default_alpha: 0.75,
        }
    }
}

impl StoreConfig {
    pub fn new(index_name: impl Into<String>, text_key: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            text_key: text_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_multi_tenancy(mut self, enabled: bool) -> Self {
        self.use_multi_tenancy = enabled;
        self
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::ConfigFile {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.text_key.is_empty() {
            return Err(StoreError::config("text_key must not be empty"));
        }
        if self.batch_size == 0 {
            return Err(StoreError::config("batch_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.default_alpha) {
            return Err(StoreError::config(format!(
                "default_alpha must be in [0, 1], got {}",
                self.default_alpha
            )));
        }
        Ok(())
    }
}
