//! Mock discovery adapter for testing
//!
//! Returns predefined response payloads without reaching any backend.
//! Payloads are stored as raw JSON and go through the same decoder as a
//! real response, so malformed bodies can be simulated too.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cubeattr_catalog::{MockAdapter, DiscoveryAdapter, SourceRef};
//! use cubeattr_core::{Attribute, AttributeType};
//!
//! let adapter = MockAdapter::new();
//! let source = SourceRef::new("druid", "wikipedia");
//! adapter.add_attributes(source.clone(), vec![
//!     Attribute::new("time", AttributeType::Time),
//! ]).await;
//!
//! let attributes = adapter.discover(&source).await?;
//! assert_eq!(adapter.request_count(), 1);
//! ```
//!
//! ## Holding responses
//!
//! ```rust,ignore
//! // Requests block until released, so a test can act while one is in flight
//! let adapter = MockAdapter::new().with_held_responses();
//! adapter.release(1);
//! ```

use crate::adapter::{DiscoveryAdapter, DiscoveryError, SourceRef};
use crate::payload::{decode_value, DiscoveryResponse};
use cubeattr_core::Attribute;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};

/// Mock discovery adapter
///
/// Clones share payloads, errors, the request counter and the hold gate.
#[derive(Clone)]
pub struct MockAdapter {
    /// Response payloads by source key
    payloads: Arc<RwLock<HashMap<String, serde_json::Value>>>,

    /// Errors to return for specific sources
    errors: Arc<RwLock<HashMap<String, DiscoveryError>>>,

    /// Number of `discover` calls made so far
    requests: Arc<AtomicUsize>,

    /// When set, each request waits for one permit before answering
    gate: Option<Arc<Semaphore>>,

    /// Simulated latency (milliseconds)
    latency_ms: u64,
}

impl MockAdapter {
    /// Create a mock adapter that knows no sources
    pub fn new() -> Self {
        Self {
            payloads: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(AtomicUsize::new(0)),
            gate: None,
            latency_ms: 0,
        }
    }

    /// Register the attributes a source reports
    pub async fn add_attributes(&self, source: SourceRef, attributes: Vec<Attribute>) {
        let payload = serde_json::to_value(DiscoveryResponse { attributes })
            .unwrap_or(serde_json::Value::Null);
        self.add_payload(source, payload).await;
    }

    /// Register a raw response body for a source
    pub async fn add_payload(&self, source: SourceRef, payload: serde_json::Value) {
        self.payloads.write().await.insert(source.key(), payload);
    }

    /// Make requests for a source fail with `error`
    pub async fn add_error_for_source(&self, source: SourceRef, error: DiscoveryError) {
        self.errors.write().await.insert(source.key(), error);
    }

    /// Hold every response until [`MockAdapter::release`] is called
    pub fn with_held_responses(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let `n` held requests answer
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Configure simulated latency for every request
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Number of discovery requests received
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn wait_turn(&self) -> Result<(), DiscoveryError> {
        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| DiscoveryError::Network(e.to_string()))?;
            permit.forget();
        }

        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }

        Ok(())
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DiscoveryAdapter for MockAdapter {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn discover(&self, source: &SourceRef) -> Result<Vec<Attribute>, DiscoveryError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.wait_turn().await?;

        if let Some(error) = self.errors.read().await.get(&source.key()) {
            return Err(error.clone());
        }

        let payload = self
            .payloads
            .read()
            .await
            .get(&source.key())
            .cloned()
            .ok_or_else(|| DiscoveryError::SourceNotFound(source.key()))?;

        decode_value(payload)
    }
}

/// Builder for a [`MockAdapter`] with several sources
///
/// ```rust,ignore
/// let adapter = MockAdapterBuilder::new()
///     .with_attributes("druid", "wikipedia", vec![Attribute::new("page", AttributeType::String)])
///     .with_error("druid", "broken", DiscoveryError::Network("refused".into()))
///     .build();
/// ```
pub struct MockAdapterBuilder {
    payloads: HashMap<String, serde_json::Value>,
    errors: HashMap<String, DiscoveryError>,
    held: bool,
    latency_ms: u64,
}

impl MockAdapterBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            payloads: HashMap::new(),
            errors: HashMap::new(),
            held: false,
            latency_ms: 0,
        }
    }

    /// Add the attributes of a source
    pub fn with_attributes(self, cluster: &str, source: &str, attributes: Vec<Attribute>) -> Self {
        let payload = serde_json::to_value(DiscoveryResponse { attributes })
            .unwrap_or(serde_json::Value::Null);
        self.with_payload(cluster, source, payload)
    }

    /// Add a raw response body for a source
    pub fn with_payload(mut self, cluster: &str, source: &str, payload: serde_json::Value) -> Self {
        self.payloads.insert(SourceRef::new(cluster, source).key(), payload);
        self
    }

    /// Add an error for a source
    pub fn with_error(mut self, cluster: &str, source: &str, error: DiscoveryError) -> Self {
        self.errors.insert(SourceRef::new(cluster, source).key(), error);
        self
    }

    /// Hold responses until released
    pub fn with_held_responses(mut self) -> Self {
        self.held = true;
        self
    }

    /// Configure latency
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Build the MockAdapter
    pub fn build(self) -> MockAdapter {
        MockAdapter {
            payloads: Arc::new(RwLock::new(self.payloads)),
            errors: Arc::new(RwLock::new(self.errors)),
            requests: Arc::new(AtomicUsize::new(0)),
            gate: self.held.then(|| Arc::new(Semaphore::new(0))),
            latency_ms: self.latency_ms,
        }
    }
}

impl Default for MockAdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeattr_core::AttributeType;

    #[tokio::test]
    async fn test_mock_adapter_basic() {
        let adapter = MockAdapter::new();
        let source = SourceRef::new("druid", "wikipedia");

        adapter
            .add_attributes(
                source.clone(),
                vec![
                    Attribute::new("time", AttributeType::Time),
                    Attribute::new("page", AttributeType::String),
                ],
            )
            .await;

        let attributes = adapter.discover(&source).await.unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].name, "time");
        assert_eq!(attributes[1].name, "page");
        assert_eq!(adapter.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_adapter_source_not_found() {
        let adapter = MockAdapter::new();
        let result = adapter.discover(&SourceRef::new("druid", "missing")).await;
        assert!(matches!(result, Err(DiscoveryError::SourceNotFound(key)) if key == "druid/missing"));
    }

    #[tokio::test]
    async fn test_mock_adapter_custom_error() {
        let adapter = MockAdapter::new();
        let source = SourceRef::new("druid", "wikipedia");
        adapter
            .add_error_for_source(source.clone(), DiscoveryError::Network("refused".to_string()))
            .await;

        let result = adapter.discover(&source).await;
        assert_eq!(result, Err(DiscoveryError::Network("refused".to_string())));
    }

    #[tokio::test]
    async fn test_mock_adapter_malformed_payload() {
        let adapter = MockAdapterBuilder::new()
            .with_payload("druid", "wikipedia", serde_json::json!({"attributes": [{"type": "TIME"}]}))
            .build();

        let result = adapter.discover(&SourceRef::new("druid", "wikipedia")).await;
        assert!(matches!(result, Err(DiscoveryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_mock_adapter_held_until_released() {
        let adapter = MockAdapterBuilder::new()
            .with_attributes("druid", "wikipedia", vec![Attribute::new("page", AttributeType::String)])
            .with_held_responses()
            .build();

        let remote = adapter.clone();
        let handle = tokio::spawn(async move {
            remote.discover(&SourceRef::new("druid", "wikipedia")).await
        });

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!handle.is_finished());
        assert_eq!(adapter.request_count(), 1);

        adapter.release(1);
        let attributes = handle.await.unwrap().unwrap();
        assert_eq!(attributes, vec![Attribute::new("page", AttributeType::String)]);
    }

    #[tokio::test]
    async fn test_mock_adapter_clones_share_counter() {
        let adapter = MockAdapter::new();
        let cloned = adapter.clone();

        let _ = cloned.discover(&SourceRef::new("a", "b")).await;
        let _ = cloned.discover(&SourceRef::new("a", "b")).await;

        assert_eq!(adapter.request_count(), 2);
    }
}
