//! Attribute types and the attribute value itself

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of a data cube attribute
///
/// Spellings match the ones used by the discovery backend, so the enum
/// round-trips through JSON and TOML unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    #[serde(rename = "NULL")]
    Null,

    #[serde(rename = "BOOLEAN")]
    Boolean,

    #[serde(rename = "NUMBER")]
    Number,

    #[serde(rename = "TIME")]
    Time,

    #[serde(rename = "STRING")]
    String,

    #[serde(rename = "NUMBER_RANGE")]
    NumberRange,

    #[serde(rename = "TIME_RANGE")]
    TimeRange,

    #[serde(rename = "SET")]
    Set,

    #[serde(rename = "SET/STRING")]
    SetString,

    #[serde(rename = "SET/NUMBER")]
    SetNumber,

    #[serde(rename = "DATASET")]
    Dataset,
}

impl AttributeType {
    /// Every known type, in declaration order
    pub const ALL: [AttributeType; 11] = [
        Self::Null,
        Self::Boolean,
        Self::Number,
        Self::Time,
        Self::String,
        Self::NumberRange,
        Self::TimeRange,
        Self::Set,
        Self::SetString,
        Self::SetNumber,
        Self::Dataset,
    ];

    /// Wire spelling of the type (e.g. `SET/STRING`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Boolean => "BOOLEAN",
            Self::Number => "NUMBER",
            Self::Time => "TIME",
            Self::String => "STRING",
            Self::NumberRange => "NUMBER_RANGE",
            Self::TimeRange => "TIME_RANGE",
            Self::Set => "SET",
            Self::SetString => "SET/STRING",
            Self::SetNumber => "SET/NUMBER",
            Self::Dataset => "DATASET",
        }
    }

    /// Icon identifier used by the header renderer (`dim-set-string`)
    pub fn icon_name(&self) -> String {
        format!("dim-{}", self.as_str().to_lowercase().replace('/', "-"))
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown type spelling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown attribute type: {0}")]
pub struct UnknownAttributeType(pub String);

impl FromStr for AttributeType {
    type Err = UnknownAttributeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| UnknownAttributeType(s.to_string()))
    }
}

/// A single column definition of a data cube
///
/// Attributes are identified by `name` everywhere in the workflow; two
/// attributes with the same name describe the same column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Column name, unique within a cube
    pub name: String,

    /// Attribute type
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,

    /// Non-default role such as `unique` or `histogram`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<String>,
}

impl Attribute {
    /// Create a new attribute with no special role
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            special: None,
        }
    }

    /// Set the special role
    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = Some(special.into());
        self
    }

    /// Same attribute with a different type
    pub fn with_type(mut self, attribute_type: AttributeType) -> Self {
        self.attribute_type = attribute_type;
        self
    }

    /// Same attribute with the special role removed
    pub fn without_special(mut self) -> Self {
        self.special = None;
        self
    }
}
