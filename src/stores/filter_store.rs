// SPDX-License-Identifier: MPL-2.0
//! Store holding the currently-applied filter state for one editing session.

use crate::filters::FilterState;

/// Owns the live [`FilterState`] while a signal is being edited.
///
/// `apply_filters` replaces the applied payload (criteria and applied name)
/// but deliberately leaves the saved-filter selection alone: selection is a
/// separate concern with its own setter, so applying an ad-hoc edit does not
/// silently drop the user's selection. Callers that want both cleared issue
/// both writes, as the clear button does.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    state: FilterState,
}

impl FilterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The live filter state.
    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.state
    }

    /// Replaces the active criteria and applied name with `next`.
    pub fn apply_filters(&mut self, next: FilterState) {
        let selected = self.state.selected_saved_filter_id.take();
        self.state = next;
        self.state.selected_saved_filter_id = selected;
    }

    /// Updates which saved filter set is selected in the UI.
    pub fn set_selected_saved_filter_id(&mut self, id: Option<String>) {
        self.state.selected_saved_filter_id = id;
    }

    #[must_use]
    pub fn selected_saved_filter_id(&self) -> Option<&str> {
        self.state.selected_saved_filter_id.as_deref()
    }
}
