//! Descriptors handed to the presentation layer

use crate::suggestions::SuggestionDialog;
use cubeattr_core::{plural_if_needed, Attribute};

/// Title of the suggestion dialog
pub const SUGGESTION_TITLE: &str = "Attribute Suggestions";

/// Single attribute edit dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModal {
    pub attribute: Attribute,
}

/// One selectable suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionOption {
    /// `name as TYPE`, plus ` [special]` when set
    pub label: String,
    pub attribute: Attribute,
}

impl SuggestionOption {
    pub fn new(attribute: &Attribute) -> Self {
        let special = attribute
            .special
            .as_ref()
            .map(|s| format!(" [{}]", s))
            .unwrap_or_default();

        Self {
            label: format!("{} as {}{}", attribute.name, attribute.attribute_type, special),
            attribute: attribute.clone(),
        }
    }
}

/// Suggestion selection dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionModal {
    pub title: String,
    pub loading: bool,
    pub options: Vec<SuggestionOption>,
}

impl SuggestionModal {
    /// Descriptor for the dialog state, `None` when closed
    pub fn from_dialog(dialog: &SuggestionDialog) -> Option<Self> {
        let (loading, options) = match dialog {
            SuggestionDialog::Closed => return None,
            SuggestionDialog::Loading { .. } => (true, Vec::new()),
            SuggestionDialog::Ready(set) => {
                (false, set.attributes().iter().map(SuggestionOption::new).collect())
            }
        };

        Some(Self {
            title: SUGGESTION_TITLE.to_string(),
            loading,
            options,
        })
    }

    /// Loaded, but nothing to add
    pub fn is_empty(&self) -> bool {
        !self.loading && self.options.is_empty()
    }

    /// Confirm button label for `selected` chosen options
    pub fn ok_label(selected: usize) -> String {
        format!("Add {}", plural_if_needed(selected, "attribute"))
    }
}

/// Action buttons above the attribute table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenActions {
    /// Filter editing is not implemented, so this is always false
    pub filters_enabled: bool,
    pub add_attributes_enabled: bool,
}

impl ScreenActions {
    pub fn for_dialog(dialog: &SuggestionDialog) -> Self {
        Self {
            filters_enabled: false,
            add_attributes_enabled: !dialog.is_open(),
        }
    }
}
