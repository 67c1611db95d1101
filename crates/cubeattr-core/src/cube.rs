//! Data cube configuration
//!
//! A [`DataCube`] is owned by whoever hosts the attribute workflow. The
//! workflow only reads it and proposes replacements built with the
//! copy-on-write operations below.

use crate::attribute::Attribute;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Errors produced by cube operations and cube file I/O
#[derive(Debug, thiserror::Error)]
pub enum CubeError {
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("Attribute already exists: {0}")]
    DuplicateAttribute(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

/// Configuration of a single data cube
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCube {
    /// Cube name
    pub name: String,

    /// Human readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Cluster the source lives on
    pub cluster_name: String,

    /// Source (datasource/table) name within the cluster
    pub source: String,

    /// Name of the primary time attribute, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_attribute: Option<String>,

    /// Ordered attribute list
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl DataCube {
    /// Create a cube with no attributes
    pub fn new(
        name: impl Into<String>,
        cluster_name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: None,
            cluster_name: cluster_name.into(),
            source: source.into(),
            time_attribute: None,
            attributes: Vec::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the primary time attribute name
    pub fn with_time_attribute(mut self, name: impl Into<String>) -> Self {
        self.time_attribute = Some(name.into());
        self
    }

    /// Set the attribute list
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Name of the primary time attribute
    pub fn primary_time_attribute(&self) -> Option<&str> {
        self.time_attribute.as_deref()
    }

    /// Find an attribute by name
    pub fn find_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Get attribute names in order
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Replace the attribute with the same name, keeping its position
    pub fn update_attribute(&self, attribute: Attribute) -> Result<DataCube, CubeError> {
        let index = self
            .attributes
            .iter()
            .position(|a| a.name == attribute.name)
            .ok_or_else(|| CubeError::AttributeNotFound(attribute.name.clone()))?;

        let mut attributes = self.attributes.clone();
        attributes[index] = attribute;
        Ok(self.change_attributes(attributes))
    }

    /// Drop candidates whose name is already part of this cube
    ///
    /// Candidate order is preserved. A name repeated among the candidates is
    /// kept only at its first occurrence.
    pub fn filter_attributes(&self, candidates: Vec<Attribute>) -> Vec<Attribute> {
        let mut seen: HashSet<String> =
            self.attributes.iter().map(|a| a.name.clone()).collect();

        candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.name.clone()))
            .collect()
    }

    /// Append attributes at the end, in the given order
    pub fn append_attributes(&self, extra: Vec<Attribute>) -> Result<DataCube, CubeError> {
        let mut seen: HashSet<&str> = self.attributes.iter().map(|a| a.name.as_str()).collect();
        for attribute in &extra {
            if !seen.insert(attribute.name.as_str()) {
                return Err(CubeError::DuplicateAttribute(attribute.name.clone()));
            }
        }

        let mut attributes = self.attributes.clone();
        attributes.extend(extra);
        Ok(self.change_attributes(attributes))
    }

    /// Same cube with a wholly new attribute list
    pub fn change_attributes(&self, attributes: Vec<Attribute>) -> DataCube {
        DataCube {
            attributes,
            ..self.clone()
        }
    }

    /// Load a cube from a `.json` or `.toml` file
    pub fn from_file(path: &Path) -> Result<Self, CubeError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| CubeError::IoError(e.to_string()))?;

        if is_json(path) {
            Self::from_json(&contents)
        } else {
            Self::from_toml(&contents)
        }
    }

    /// Parse a cube from JSON
    pub fn from_json(json: &str) -> Result<Self, CubeError> {
        serde_json::from_str(json).map_err(|e| CubeError::ParseError(e.to_string()))
    }

    /// Parse a cube from TOML
    pub fn from_toml(toml: &str) -> Result<Self, CubeError> {
        toml::from_str(toml).map_err(|e| CubeError::ParseError(e.to_string()))
    }

    /// Render the cube as pretty JSON
    pub fn to_json(&self) -> Result<String, CubeError> {
        serde_json::to_string_pretty(self).map_err(|e| CubeError::SerializeError(e.to_string()))
    }

    /// Render the cube as TOML
    pub fn to_toml(&self) -> Result<String, CubeError> {
        toml::to_string_pretty(self).map_err(|e| CubeError::SerializeError(e.to_string()))
    }

    /// Write the cube to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> Result<(), CubeError> {
        let contents = if is_json(path) {
            self.to_json()?
        } else {
            self.to_toml()?
        };

        std::fs::write(path, contents).map_err(|e| CubeError::IoError(e.to_string()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeType;

    fn wiki() -> DataCube {
        DataCube::new("wiki", "druid", "wikipedia")
            .with_time_attribute("time")
            .with_attributes(vec![
                Attribute::new("time", AttributeType::Time),
                Attribute::new("page", AttributeType::String),
                Attribute::new("added", AttributeType::Number),
            ])
    }

    #[test]
    fn update_keeps_position() {
        let cube = wiki();
        let updated = cube
            .update_attribute(
                Attribute::new("page", AttributeType::SetString).with_special("unique"),
            )
            .unwrap();

        assert_eq!(updated.attribute_names(), vec!["time", "page", "added"]);
        assert_eq!(updated.attributes[1].attribute_type, AttributeType::SetString);
        assert_eq!(updated.attributes[1].special.as_deref(), Some("unique"));
        // receiver untouched
        assert_eq!(cube.attributes[1].attribute_type, AttributeType::String);
    }

    #[test]
    fn update_missing_attribute_fails() {
        let result = wiki().update_attribute(Attribute::new("nope", AttributeType::String));
        assert!(matches!(result, Err(CubeError::AttributeNotFound(name)) if name == "nope"));
    }

    #[test]
    fn filter_is_set_difference_by_name() {
        let candidates = vec![
            Attribute::new("page", AttributeType::SetString),
            Attribute::new("country", AttributeType::String),
            Attribute::new("deleted", AttributeType::Number),
            Attribute::new("country", AttributeType::Number),
        ];

        let filtered = wiki().filter_attributes(candidates);
        assert_eq!(
            filtered,
            vec![
                Attribute::new("country", AttributeType::String),
                Attribute::new("deleted", AttributeType::Number),
            ]
        );
    }

    #[test]
    fn append_rejects_duplicates() {
        let cube = wiki();
        let appended = cube
            .append_attributes(vec![Attribute::new("country", AttributeType::String)])
            .unwrap();
        assert_eq!(appended.attribute_names(), vec!["time", "page", "added", "country"]);

        let result = cube.append_attributes(vec![Attribute::new("page", AttributeType::String)]);
        assert!(matches!(result, Err(CubeError::DuplicateAttribute(_))));
    }

    #[test]
    fn toml_roundtrip() {
        let cube = wiki().with_title("Wikipedia");
        let toml = cube.to_toml().unwrap();
        assert!(toml.contains("[[attributes]]"));
        assert_eq!(DataCube::from_toml(&toml).unwrap(), cube);
    }

    #[test]
    fn file_format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let cube = wiki();

        let json_path = dir.path().join("wiki.json");
        cube.save_to_file(&json_path).unwrap();
        let raw = std::fs::read_to_string(&json_path).unwrap();
        assert!(raw.trim_start().starts_with('{'));
        assert_eq!(DataCube::from_file(&json_path).unwrap(), cube);

        let toml_path = dir.path().join("wiki.toml");
        cube.save_to_file(&toml_path).unwrap();
        assert_eq!(DataCube::from_file(&toml_path).unwrap(), cube);
    }
}
