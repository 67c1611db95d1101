//! cubeattr engine - attribute workflow logic
//!
//! This crate implements the attribute screen of a data cube:
//! - Column derivation from a cube's attribute list
//! - Single attribute editing
//! - Discovery of attributes missing from the cube
//! - The workflow that ties them together and proposes new cubes to its owner

pub mod columns;
pub mod edit;
pub mod error;
pub mod suggestions;
pub mod view;
pub mod workflow;

pub use columns::{derive_columns, DisplayColumn, HeaderDescriptor, COLUMN_WIDTH};
pub use edit::{EditController, EditSession};
pub use error::WorkflowError;
pub use suggestions::{
    Notice, PendingDiscovery, RequestId, ResponseOutcome, SuggestionController,
    SuggestionDialog, SuggestionSet,
};
pub use view::{EditModal, ScreenActions, SuggestionModal, SuggestionOption};
pub use workflow::{
    AttributeWorkflow, ChangeReason, DiscoveryCompletion, Notifier, ProposedChange,
    TracingNotifier,
};
