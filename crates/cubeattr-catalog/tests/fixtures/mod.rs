//! Test fixtures for discovery adapter integration tests
//!
//! Attribute lists modelled on the sample sources a cluster typically
//! exposes.

#![allow(dead_code)]

use cubeattr_core::{Attribute, AttributeType};

/// Attributes of a wikipedia edits source
pub fn wikipedia_attributes() -> Vec<Attribute> {
    vec![
        Attribute::new("time", AttributeType::Time),
        Attribute::new("channel", AttributeType::String),
        Attribute::new("page", AttributeType::String),
        Attribute::new("user", AttributeType::String).with_special("unique"),
        Attribute::new("added", AttributeType::Number),
        Attribute::new("deleted", AttributeType::Number),
    ]
}

/// Attributes of a web traffic source
pub fn traffic_attributes() -> Vec<Attribute> {
    vec![
        Attribute::new("__time", AttributeType::Time),
        Attribute::new("tags", AttributeType::SetString),
        Attribute::new("latency", AttributeType::Number).with_special("histogram"),
    ]
}
