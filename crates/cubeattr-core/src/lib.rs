//! cubeattr core
//!
//! Domain model for data cube attribute management. Every operation on a
//! [`DataCube`] returns a new value; nothing here mutates a cube in place.

pub mod attribute;
pub mod cube;
pub mod settings;
pub mod text;

pub use attribute::{Attribute, AttributeType, UnknownAttributeType};
pub use cube::{CubeError, DataCube};
pub use settings::{ConfigError, DiscoverySettings, NoticeSettings, Settings};
pub use text::{plural_if_needed, title_case};
