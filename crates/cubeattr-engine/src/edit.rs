//! Single attribute editing

use crate::error::WorkflowError;
use cubeattr_core::{Attribute, CubeError, DataCube};

/// The attribute currently being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    attribute: Attribute,
}

impl EditSession {
    /// Attribute as it was when editing began
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }
}

/// Tracks at most one [`EditSession`]
#[derive(Debug, Clone, Default)]
pub struct EditController {
    session: Option<EditSession>,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active session, if any
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Start editing `attribute`, replacing any session already open
    pub fn begin(&mut self, attribute: Attribute) {
        tracing::debug!(attribute = %attribute.name, "Begin attribute edit");
        self.session = Some(EditSession { attribute });
    }

    /// Drop the session without proposing anything
    pub fn cancel(&mut self) -> Option<EditSession> {
        self.session.take()
    }

    /// End the session and build the cube with `updated` substituted in place
    ///
    /// The session ends whether or not the substitution succeeds. A missing
    /// target is a consistency fault: nothing is appended and the error is
    /// returned for the owner to surface.
    pub fn save(&mut self, cube: &DataCube, updated: Attribute) -> Result<DataCube, WorkflowError> {
        self.session.take().ok_or(WorkflowError::NoActiveEdit)?;

        cube.update_attribute(updated).map_err(|e| match e {
            CubeError::AttributeNotFound(name) => {
                tracing::error!(attribute = %name, cube = %cube.name, "Edited attribute missing from cube");
                WorkflowError::AttributeNotFound(name)
            }
            other => WorkflowError::Cube(other),
        })
    }
}
