//! Cubes and discovery results shared by the workflow tests

#![allow(dead_code)]

use cubeattr_core::{Attribute, AttributeType, DataCube};
use cubeattr_engine::{Notice, Notifier};
use std::sync::Mutex;

pub fn attr(name: &str) -> Attribute {
    Attribute::new(name, AttributeType::String)
}

/// Cube with attributes `a` and `b` on `druid/wikipedia`
pub fn ab_cube() -> DataCube {
    DataCube::new("wiki", "druid", "wikipedia").with_attributes(vec![attr("a"), attr("b")])
}

/// Wikipedia cube as usually configured, with `time` as primary
pub fn wikipedia_cube() -> DataCube {
    DataCube::new("wiki", "druid", "wikipedia")
        .with_title("Wikipedia Edits")
        .with_time_attribute("time")
        .with_attributes(vec![
            Attribute::new("time", AttributeType::Time),
            Attribute::new("channel", AttributeType::String),
            Attribute::new("page", AttributeType::String),
            Attribute::new("added", AttributeType::Number),
        ])
}

/// Everything the wikipedia source reports
pub fn wikipedia_source() -> Vec<Attribute> {
    vec![
        Attribute::new("time", AttributeType::Time),
        Attribute::new("channel", AttributeType::String),
        Attribute::new("page", AttributeType::String),
        Attribute::new("user", AttributeType::String).with_special("unique"),
        Attribute::new("added", AttributeType::Number),
        Attribute::new("deleted", AttributeType::Number),
        Attribute::new("tags", AttributeType::SetString),
    ]
}

/// Notifier that records every notice
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn failure(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
