//! Attribute workflow coordinator
//!
//! [`AttributeWorkflow`] is what a screen owns. It keeps the last cube it was
//! given, routes gestures to the edit and suggestion controllers, and sends
//! every resulting cube out on a single [`ProposedChange`] channel. It never
//! applies its own proposals: the owner decides, then calls
//! [`AttributeWorkflow::set_cube`] with whatever cube is now current.
//!
//! Discovery runs on a spawned task. Its result comes back through the
//! workflow's own completion queue and is applied on the owner's task by
//! [`AttributeWorkflow::process_next_completion`], so every state transition
//! happens on a single task.
//!
//! ```rust,ignore
//! let (tx, mut changes) = tokio::sync::mpsc::unbounded_channel();
//! let mut workflow = AttributeWorkflow::new(cube, Arc::new(adapter), tx);
//!
//! workflow.open_suggestions();
//! workflow.process_next_completion().await;
//! let chosen = workflow.suggestion_dialog().suggestions().unwrap().select(&["country"])?;
//! workflow.add_selected(chosen)?;
//!
//! let change = changes.recv().await.unwrap();
//! workflow.set_cube(change.cube);
//! ```

use crate::columns::{derive_columns, DisplayColumn};
use crate::edit::{EditController, EditSession};
use crate::error::WorkflowError;
use crate::suggestions::{
    Notice, PendingDiscovery, RequestId, ResponseOutcome, SuggestionController, SuggestionDialog,
};
use crate::view::{EditModal, ScreenActions, SuggestionModal};
use cubeattr_catalog::{DiscoveryAdapter, DiscoveryError};
use cubeattr_core::{Attribute, DataCube, Settings};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Why a new cube is being proposed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeReason {
    /// One attribute was edited in place
    AttributeEdited { name: String },
    /// Suggested attributes were appended
    AttributesAdded { names: Vec<String> },
}

/// A complete replacement cube for the owner to accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedChange {
    pub cube: DataCube,
    pub reason: ChangeReason,
}

/// Result of a spawned discovery request
#[derive(Debug)]
pub struct DiscoveryCompletion {
    pub request: RequestId,
    pub result: Result<Vec<Attribute>, DiscoveryError>,
}

/// Receives failure notices
pub trait Notifier: Send + Sync {
    fn failure(&self, notice: &Notice);
}

/// Notifier that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn failure(&self, notice: &Notice) {
        tracing::warn!(title = %notice.title, message = %notice.message, "Failure notice");
    }
}

/// Coordinator of the attribute screen
pub struct AttributeWorkflow {
    /// Last cube supplied by the owner
    cube: DataCube,

    edit: EditController,
    suggestions: SuggestionController,

    adapter: Arc<dyn DiscoveryAdapter>,
    notifier: Arc<dyn Notifier>,
    discovery_timeout: Duration,

    /// Outbound proposals
    changes: UnboundedSender<ProposedChange>,

    /// Discovery results posted by spawned tasks
    completions_tx: UnboundedSender<DiscoveryCompletion>,
    completions_rx: UnboundedReceiver<DiscoveryCompletion>,

    /// Spawned discoveries whose completion has not been taken yet
    in_flight: usize,
}

impl AttributeWorkflow {
    /// Create a workflow with default settings and a logging notifier
    pub fn new(
        cube: DataCube,
        adapter: Arc<dyn DiscoveryAdapter>,
        changes: UnboundedSender<ProposedChange>,
    ) -> Self {
        let settings = Settings::default();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            cube,
            edit: EditController::new(),
            suggestions: SuggestionController::new(settings.notices),
            adapter,
            notifier: Arc::new(TracingNotifier),
            discovery_timeout: settings.discovery.timeout(),
            changes,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    /// Apply discovery timeout and notice wording from settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.discovery_timeout = settings.discovery.timeout();
        self.suggestions = SuggestionController::new(settings.notices.clone());
        self
    }

    /// Send failure notices to `notifier`
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    // ------------------------------------------------------------------
    // Observable state
    // ------------------------------------------------------------------

    /// Current cube, as last supplied by the owner
    pub fn cube(&self) -> &DataCube {
        &self.cube
    }

    /// Columns of the current cube
    pub fn columns(&self) -> Vec<DisplayColumn> {
        derive_columns(&self.cube)
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.session()
    }

    pub fn suggestion_dialog(&self) -> &SuggestionDialog {
        self.suggestions.dialog()
    }

    pub fn edit_modal(&self) -> Option<EditModal> {
        self.edit.session().map(|s| EditModal {
            attribute: s.attribute().clone(),
        })
    }

    pub fn suggestion_modal(&self) -> Option<SuggestionModal> {
        SuggestionModal::from_dialog(self.suggestions.dialog())
    }

    pub fn actions(&self) -> ScreenActions {
        ScreenActions::for_dialog(self.suggestions.dialog())
    }

    /// Accept a new cube from the owner
    pub fn set_cube(&mut self, cube: DataCube) {
        tracing::debug!(cube = %cube.name, attributes = cube.attributes.len(), "Cube replaced");
        self.suggestions.refilter(&cube);
        self.cube = cube;
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Start editing `attribute`
    pub fn begin_edit(&mut self, attribute: Attribute) {
        self.edit.begin(attribute);
    }

    /// Header activation: start editing the attribute of column `index`
    ///
    /// Returns false when there is no such column.
    pub fn activate_header(&mut self, index: usize) -> bool {
        match self.cube.attributes.get(index) {
            Some(attribute) => {
                self.edit.begin(attribute.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    /// Finish editing and propose the cube with `updated` in place
    pub fn save_edit(&mut self, updated: Attribute) -> Result<(), WorkflowError> {
        let name = updated.name.clone();
        let cube = self.edit.save(&self.cube, updated)?;
        self.propose(cube, ChangeReason::AttributeEdited { name })
    }

    // ------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------

    /// Show the suggestion dialog and start discovery in the background
    ///
    /// Returns whether a request was issued. Must be called from within a
    /// tokio runtime.
    pub fn open_suggestions(&mut self) -> bool {
        match self.suggestions.open(&self.cube) {
            Some(pending) => {
                self.spawn_discovery(pending);
                true
            }
            None => false,
        }
    }

    pub fn close_suggestions(&mut self) {
        self.suggestions.close();
    }

    /// Append `chosen` suggestions and propose the result
    ///
    /// Choosing nothing still proposes the cube, with its attributes unchanged.
    pub fn add_selected(&mut self, chosen: Vec<Attribute>) -> Result<(), WorkflowError> {
        let names = chosen.iter().map(|a| a.name.clone()).collect();
        let cube = self.suggestions.add_selected(&self.cube, chosen)?;
        self.propose(cube, ChangeReason::AttributesAdded { names })
    }

    /// Wait for the next discovery result
    ///
    /// Returns `None` right away when no discovery is outstanding.
    pub async fn next_completion(&mut self) -> Option<DiscoveryCompletion> {
        if self.in_flight == 0 {
            return None;
        }

        let completion = self.completions_rx.recv().await?;
        self.in_flight -= 1;
        Some(completion)
    }

    /// Number of discoveries still to be taken with [`Self::next_completion`]
    pub fn pending_discoveries(&self) -> usize {
        self.in_flight
    }

    /// Apply a discovery result, notifying on failure
    pub fn handle_completion(&mut self, completion: DiscoveryCompletion) -> ResponseOutcome {
        let outcome =
            self.suggestions
                .handle_response(completion.request, &self.cube, completion.result);

        if let ResponseOutcome::Failed(notice) = &outcome {
            self.notifier.failure(notice);
        }

        outcome
    }

    /// Wait for the next discovery result and apply it
    pub async fn process_next_completion(&mut self) -> Option<ResponseOutcome> {
        let completion = self.next_completion().await?;
        Some(self.handle_completion(completion))
    }

    fn spawn_discovery(&mut self, pending: PendingDiscovery) {
        let adapter = Arc::clone(&self.adapter);
        let completions = self.completions_tx.clone();
        let timeout = self.discovery_timeout;

        tracing::debug!(adapter = adapter.name(), request = %pending.request, "Spawning discovery");
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, adapter.discover(&pending.source)).await {
                Ok(result) => result,
                Err(_) => Err(DiscoveryError::Timeout(timeout.as_millis() as u64)),
            };

            // The workflow may be gone by now; nothing to report to then.
            let _ = completions.send(DiscoveryCompletion {
                request: pending.request,
                result,
            });
        });
    }

    fn propose(&self, cube: DataCube, reason: ChangeReason) -> Result<(), WorkflowError> {
        tracing::info!(cube = %cube.name, ?reason, "Proposing cube change");
        self.changes
            .send(ProposedChange { cube, reason })
            .map_err(|_| WorkflowError::ChannelClosed)
    }
}
