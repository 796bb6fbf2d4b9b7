//! The active `(model, attribute)` selection.

use std::sync::Arc;

use devscope_trace::Hierarchy;
use tracing::debug;

/// Result of a selection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    /// A model was selected and the attribute reset.
    Model,
    /// An attribute was selected.
    Attribute,
    /// The request named a non-leaf model, so the selection was cleared.
    Cleared,
    /// The request was ignored and the selection is unchanged.
    Ignored,
}

/// The active model and attribute path.
///
/// Only leaves of the model hierarchy and of the selected model's attribute
/// hierarchy can be selected. An empty selection means nothing is plotted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    model: Option<Arc<str>>,
    attribute: Option<Arc<str>>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected model.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the selected attribute path.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Returns the `(model, attribute)` pair when both are selected.
    #[must_use]
    pub fn active(&self) -> Option<(&str, &str)> {
        Some((self.model.as_deref()?, self.attribute.as_deref()?))
    }

    /// Returns true if a series is selected.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    /// Selects a model.
    ///
    /// The attribute is always reset. A name that is not a leaf of `models`
    /// clears the model as well.
    pub fn select_model(&mut self, model: &str, models: &Hierarchy) -> SelectionChange {
        self.attribute = None;
        if models.is_leaf(model) {
            debug!(model, "model selected");
            self.model = Some(Arc::from(model));
            SelectionChange::Model
        } else {
            debug!(model, "not a selectable model");
            self.model = None;
            SelectionChange::Cleared
        }
    }

    /// Selects an attribute path of the selected model.
    ///
    /// Ignored when no model is selected or `path` is not a leaf of `paths`.
    pub fn select_attribute(&mut self, path: &str, paths: &Hierarchy) -> SelectionChange {
        if self.model.is_none() || !paths.is_leaf(path) {
            debug!(path, "attribute selection ignored");
            return SelectionChange::Ignored;
        }
        debug!(path, "attribute selected");
        self.attribute = Some(Arc::from(path));
        SelectionChange::Attribute
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.model = None;
        self.attribute = None;
    }
}
