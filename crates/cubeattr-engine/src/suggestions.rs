//! Attribute suggestion discovery
//!
//! The controller never talks to the backend itself. [`SuggestionController::open`]
//! hands back a [`PendingDiscovery`] describing the request to issue, and the
//! caller feeds the outcome to [`SuggestionController::handle_response`].
//! Only a response for the request currently loading is applied.

use crate::error::WorkflowError;
use cubeattr_catalog::{DiscoveryError, SourceRef};
use cubeattr_core::{Attribute, DataCube, NoticeSettings};
use std::collections::HashSet;
use std::fmt;

/// Identity of one discovery request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A discovery request the caller must issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDiscovery {
    pub request: RequestId,
    pub source: SourceRef,
}

/// Discovered attributes that are not yet part of the cube
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSet {
    attributes: Vec<Attribute>,
}

impl SuggestionSet {
    /// Keep the candidates the cube does not already have, in candidate order
    pub fn filtered(cube: &DataCube, candidates: Vec<Attribute>) -> Self {
        Self {
            attributes: cube.filter_attributes(candidates),
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Pick suggestions by name, in the order the names are given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Attribute>, WorkflowError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.attributes
                    .iter()
                    .find(|a| a.name == name)
                    .cloned()
                    .ok_or_else(|| WorkflowError::UnknownSuggestion(name.to_string()))
            })
            .collect()
    }
}

/// Visibility and contents of the suggestion dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionDialog {
    /// Dialog hidden
    #[default]
    Closed,
    /// Dialog visible, waiting for `request`
    Loading { request: RequestId },
    /// Dialog visible with results (possibly none)
    Ready(SuggestionSet),
}

impl SuggestionDialog {
    /// Whether the dialog should be displayed
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Current suggestions when ready
    pub fn suggestions(&self) -> Option<&SuggestionSet> {
        match self {
            Self::Ready(set) => Some(set),
            _ => None,
        }
    }
}

/// Non-blocking failure notice for the notification collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

/// What applying a discovery response did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Dialog now shows this many suggestions
    Ready { suggestions: usize },
    /// Discovery failed; the dialog closed and this notice should be shown
    Failed(Notice),
    /// Response was stale and changed nothing
    Ignored,
}

/// State machine of the suggestion dialog
#[derive(Debug, Clone)]
pub struct SuggestionController {
    dialog: SuggestionDialog,
    next_request: u64,
    notices: NoticeSettings,
}

impl SuggestionController {
    pub fn new(notices: NoticeSettings) -> Self {
        Self {
            dialog: SuggestionDialog::Closed,
            next_request: 1,
            notices,
        }
    }

    pub fn dialog(&self) -> &SuggestionDialog {
        &self.dialog
    }

    /// Show the dialog and start loading
    ///
    /// Returns the request to issue, or `None` when the dialog is already
    /// open: a second open never starts a second request.
    pub fn open(&mut self, cube: &DataCube) -> Option<PendingDiscovery> {
        if self.dialog.is_open() {
            tracing::debug!(state = ?self.dialog, "Suggestion dialog already open");
            return None;
        }

        let request = RequestId(self.next_request);
        self.next_request += 1;
        self.dialog = SuggestionDialog::Loading { request };

        let source = SourceRef::of(cube);
        tracing::debug!(%request, %source, "Loading attribute suggestions");
        Some(PendingDiscovery { request, source })
    }

    /// Apply the outcome of discovery request `request`
    ///
    /// Anything but the request currently loading is ignored, so a response
    /// that lands after the dialog was closed (or closed and reopened) cannot
    /// repopulate it.
    pub fn handle_response(
        &mut self,
        request: RequestId,
        cube: &DataCube,
        result: Result<Vec<Attribute>, DiscoveryError>,
    ) -> ResponseOutcome {
        match self.dialog {
            SuggestionDialog::Loading { request: loading } if loading == request => {}
            _ => {
                tracing::debug!(%request, state = ?self.dialog, "Ignoring stale discovery response");
                return ResponseOutcome::Ignored;
            }
        }

        match result {
            Ok(candidates) => {
                let offered = candidates.len();
                let set = SuggestionSet::filtered(cube, candidates);
                let suggestions = set.len();
                tracing::debug!(%request, offered, suggestions, "Attribute suggestions ready");
                self.dialog = SuggestionDialog::Ready(set);
                ResponseOutcome::Ready { suggestions }
            }
            Err(e) => {
                tracing::warn!(%request, error = %e, "Attribute discovery failed");
                self.dialog = SuggestionDialog::Closed;
                ResponseOutcome::Failed(Notice {
                    title: self.notices.failure_title.clone(),
                    message: self.notices.failure_message.clone(),
                })
            }
        }
    }

    /// Hide the dialog and discard any suggestions
    ///
    /// Returns whether the dialog was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.dialog.is_open();
        self.dialog = SuggestionDialog::Closed;
        was_open
    }

    /// Re-apply the name filter after the cube changed underneath a ready dialog
    pub fn refilter(&mut self, cube: &DataCube) {
        if let SuggestionDialog::Ready(set) = &mut self.dialog {
            let present: HashSet<&str> = cube.attributes.iter().map(|a| a.name.as_str()).collect();
            set.attributes.retain(|a| !present.contains(a.name.as_str()));
        }
    }

    /// Build the cube with `chosen` appended, and close the dialog
    ///
    /// Chosen attributes are matched to the current suggestions by name and
    /// the stored suggestion is appended. On error the dialog stays as it was.
    pub fn add_selected(
        &mut self,
        cube: &DataCube,
        chosen: Vec<Attribute>,
    ) -> Result<DataCube, WorkflowError> {
        let set = self.dialog.suggestions().ok_or(WorkflowError::SuggestionsNotReady)?;

        let names: Vec<&str> = chosen.iter().map(|a| a.name.as_str()).collect();
        let resolved = set.select(&names)?;

        let proposed = cube.append_attributes(resolved)?;
        self.dialog = SuggestionDialog::Closed;
        Ok(proposed)
    }
}

impl Default for SuggestionController {
    fn default() -> Self {
        Self::new(NoticeSettings::default())
    }
}
