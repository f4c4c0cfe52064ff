// SPDX-License-Identifier: MPL-2.0
//! Clear-filters button: visible only while the live filter state diverges
//! from the default, and resetting both stores when pressed.

use crate::filters::FilterState;
use crate::stores::{FilterStore, SignalDraft};
use iced::widget::{button, Text};
use iced::Element;

/// Messages emitted by the clear-filters button.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    Clear,
}

/// Renders the button, or `None` when the live state equals the default and
/// there is nothing to clear.
///
/// The visibility check is a single structural comparison computed once per
/// render; callers embed the result directly so no stale element survives a
/// state change.
#[must_use]
pub fn view<'a>(filters: &FilterState) -> Option<Element<'a, Message>> {
    if filters.is_default() {
        return None;
    }

    Some(
        button(Text::new("Clear filters"))
            .on_press(Message::Clear)
            .style(button::secondary)
            .into(),
    )
}

/// Resets both stores to their no-filters state.
///
/// The three writes happen in program order within one synchronous handler,
/// so no render can observe a partially-cleared state:
/// 1. push the default state through the store's apply channel,
/// 2. drop the applied saved-filter name from the draft,
/// 3. drop the saved-filter selection.
///
/// Purely local; no request is issued here. Safe to call when already
/// default, though the button is unreachable in that state.
pub fn clear(filter_store: &mut FilterStore, draft: &mut SignalDraft) {
    filter_store.apply_filters(FilterState::default());
    draft.set_applied_filters_name(None);
    filter_store.set_selected_saved_filter_id(None);
}
