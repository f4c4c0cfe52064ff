// SPDX-License-Identifier: MPL-2.0
//! Client-side state containers for the signals feature.
//!
//! Both stores are explicit, dependency-injected containers owned by the
//! application root. They are mutated only from the single-threaded update
//! loop, so a multi-write handler (like clearing filters) commits all of its
//! writes before any view can observe a partial state. Tests instantiate
//! isolated instances instead of sharing process-wide state.

pub mod draft_store;
pub mod filter_store;

pub use draft_store::SignalDraft;
pub use filter_store::FilterStore;
