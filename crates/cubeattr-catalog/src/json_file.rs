//! File-backed discovery adapter
//!
//! Reads a JSON catalog document keyed by `cluster/source`, each value being
//! a discovery response body:
//!
//! ```json
//! {
//!   "druid/wikipedia": {
//!     "attributes": [
//!       {"name": "time", "type": "TIME"},
//!       {"name": "user", "type": "STRING", "special": "unique"}
//!     ]
//!   }
//! }
//! ```
//!
//! An entry may also be a string holding a response body exactly as the
//! backend sent it. Entries are decoded lazily, per request, so one malformed
//! entry does not poison the rest of the catalog.

use crate::adapter::{DiscoveryAdapter, DiscoveryError, SourceRef};
use crate::payload::{decode_response, decode_value, DiscoveryRequest};
use cubeattr_core::Attribute;
use std::collections::HashMap;
use std::path::Path;

/// Discovery adapter serving responses from a catalog document
#[derive(Debug, Clone)]
pub struct JsonCatalogAdapter {
    entries: HashMap<String, serde_json::Value>,
}

impl JsonCatalogAdapter {
    /// Load a catalog document from disk
    pub async fn from_path(path: &Path) -> Result<Self, DiscoveryError> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            DiscoveryError::Configuration(format!(
                "Failed to read catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        let adapter = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), sources = adapter.entries.len(), "Loaded catalog");
        Ok(adapter)
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self, DiscoveryError> {
        let entries: HashMap<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| DiscoveryError::Configuration(format!("Invalid catalog: {}", e)))?;

        Ok(Self { entries })
    }

    /// Source keys present in the catalog, sorted
    pub fn source_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[async_trait::async_trait]
impl DiscoveryAdapter for JsonCatalogAdapter {
    fn name(&self) -> &'static str {
        "JsonCatalog"
    }

    async fn discover(&self, source: &SourceRef) -> Result<Vec<Attribute>, DiscoveryError> {
        let request = DiscoveryRequest::from(source);
        let key = request.catalog_key();
        tracing::trace!(?request, "Catalog lookup");

        match self.entries.get(&key) {
            Some(serde_json::Value::String(body)) => decode_response(body),
            Some(payload) => decode_value(payload.clone()),
            None => Err(DiscoveryError::SourceNotFound(key)),
        }
    }
}
