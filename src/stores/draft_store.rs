// SPDX-License-Identifier: MPL-2.0
//! Store for transient signal-creation and edit metadata.

use crate::signal::Schedule;

/// Draft metadata for the signal currently being created or edited.
///
/// `applied_filters_name` mirrors the human-readable name of whichever saved
/// filter set is applied; it is set when a saved set is selected and cleared
/// by the clear-filters action. Nothing re-validates it if the saved set is
/// renamed or deleted elsewhere.
#[derive(Debug, Clone)]
pub struct SignalDraft {
    name: String,
    schedule: Schedule,
    applied_filters_name: Option<String>,
}

impl Default for SignalDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            schedule: Schedule::Daily,
            applied_filters_name: None,
        }
    }
}

impl SignalDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }

    #[must_use]
    pub fn applied_filters_name(&self) -> Option<&str> {
        self.applied_filters_name.as_deref()
    }

    pub fn set_applied_filters_name(&mut self, name: Option<String>) {
        self.applied_filters_name = name;
    }
}
