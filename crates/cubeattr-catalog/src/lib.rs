//! Attribute discovery for data cube sources
//!
//! The attribute workflow asks a [`DiscoveryAdapter`] which attributes the
//! underlying source actually has. How the adapter reaches the backend is
//! its own business; the workflow only sees decoded attributes or a
//! [`DiscoveryError`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use cubeattr_catalog::{DiscoveryAdapter, MockAdapter, SourceRef};
//!
//! let adapter = MockAdapter::new();
//! let source = SourceRef::new("druid", "wikipedia");
//! let attributes = adapter.discover(&source).await?;
//! ```

pub mod adapter;
pub mod json_file;
pub mod mock;
pub mod payload;

pub use adapter::{DiscoveryAdapter, DiscoveryError, SourceRef};
pub use json_file::JsonCatalogAdapter;
pub use mock::{MockAdapter, MockAdapterBuilder};
pub use payload::{decode_response, decode_value, DiscoveryRequest, DiscoveryResponse};
