// SPDX-License-Identifier: MPL-2.0
//! Bridge from drawer confirmations to signal updates.
//!
//! Translates `(Signal, FilterState)` into an [`UpdateSignalRequest`] through
//! the pure [`build_update_params`] transform and asks the parent to dispatch
//! it over the mutation channel. The filter store is only committed after the
//! server confirms (commit-after-confirmation): a failed update leaves the
//! drawer open and the previous server-confirmed state untouched.

use crate::error::ApiError;
use crate::filters::FilterState;
use crate::signal::{build_update_params, Signal, UpdateSignalRequest};
use iced::widget::Text;
use iced::Element;

/// Lifecycle of the one update this bridge may have in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    InFlight,
    Failed(ApiError),
}

/// Bridge state: just the mutation lifecycle, exposed for UI binding.
#[derive(Debug, Clone, Default)]
pub struct State {
    mutation: MutationState,
}

/// Messages for the bridge.
#[derive(Debug, Clone)]
pub enum Message {
    /// The drawer confirmed `next` for `signal`.
    Apply { signal: Signal, next: FilterState },
    /// The mutation channel resolved.
    Completed(Result<Signal, ApiError>),
}

/// Effects propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Dispatch this request through the mutation channel.
    Dispatch(UpdateSignalRequest),
    /// The server confirmed the update; commit and invalidate caches.
    Applied(Signal),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mutation(&self) -> &MutationState {
        &self.mutation
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.mutation == MutationState::InFlight
    }

    /// Handle a bridge message.
    ///
    /// An apply while another update is in flight is refused locally rather
    /// than racing two requests; no retry happens here, and failures are kept
    /// verbatim for the UI.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Apply { signal, next } => {
                if self.is_in_flight() {
                    return Effect::None;
                }

                self.mutation = MutationState::InFlight;
                Effect::Dispatch(build_update_params(&signal, &next))
            }
            Message::Completed(Ok(signal)) => {
                self.mutation = MutationState::Idle;
                Effect::Applied(signal)
            }
            Message::Completed(Err(err)) => {
                self.mutation = MutationState::Failed(err);
                Effect::None
            }
        }
    }

    /// Status line bound to the mutation lifecycle; `None` while idle.
    #[must_use]
    pub fn status_view<'a, M: 'a>(&self) -> Option<Element<'a, M>> {
        match &self.mutation {
            MutationState::Idle => None,
            MutationState::InFlight => Some(Text::new("Saving filters...").into()),
            MutationState::Failed(err) => Some(Text::new(format!("Update failed: {err}")).into()),
        }
    }
}
