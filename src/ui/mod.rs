// SPDX-License-Identifier: MPL-2.0
//! User interface components for the signals screen.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! module owns a `State`, consumes a `Message`, and reports consequences the
//! parent must act on as an `Effect` interpreted by [`crate::app::App`].
//!
//! - [`clear_filters`] - Reset-to-default button gated on filter divergence
//! - [`filters_drawer`] - Generic filter-editing drawer
//! - [`signal_filters`] - Bridge from drawer confirmations to signal updates

pub mod clear_filters;
pub mod filters_drawer;
pub mod signal_filters;
