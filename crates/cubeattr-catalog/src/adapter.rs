//! Discovery adapter trait

use cubeattr_core::{Attribute, DataCube};
use std::fmt;

/// Identifies the source a cube reads from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    /// Cluster name
    pub cluster: String,

    /// Source name within the cluster
    pub source: String,
}

impl SourceRef {
    /// Create a new source reference
    pub fn new(cluster: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            source: source.into(),
        }
    }

    /// Source reference of a cube
    pub fn of(cube: &DataCube) -> Self {
        Self::new(cube.cluster_name.clone(), cube.source.clone())
    }

    /// Catalog key (`cluster/source`)
    pub fn key(&self) -> String {
        format!("{}/{}", self.cluster, self.source)
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Errors that can occur during attribute discovery
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Discovery timed out after {0} ms")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Something that can list the attributes present in a source
#[async_trait::async_trait]
pub trait DiscoveryAdapter: Send + Sync {
    /// Adapter name, for logs
    fn name(&self) -> &'static str;

    /// List every attribute of the source, in backend order
    ///
    /// The result is not filtered against any cube; that is the caller's job.
    async fn discover(&self, source: &SourceRef) -> Result<Vec<Attribute>, DiscoveryError>;
}
