//! Workflow errors

use cubeattr_core::CubeError;

/// Errors surfaced to the owner of the workflow
///
/// Discovery failures are not in here: they are turned into a notice and
/// never leave the suggestion controller.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The edited attribute is no longer part of the cube
    #[error("Edited attribute not found in cube: {0}")]
    AttributeNotFound(String),

    #[error("No attribute is being edited")]
    NoActiveEdit,

    #[error("Attribute suggestions are not ready")]
    SuggestionsNotReady,

    #[error("Not a current suggestion: {0}")]
    UnknownSuggestion(String),

    #[error(transparent)]
    Cube(#[from] CubeError),

    #[error("Change receiver dropped")]
    ChannelClosed,
}
