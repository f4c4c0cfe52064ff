// SPDX-License-Identifier: MPL-2.0
//! `signal_desk` is a desktop client for managing news signals, built with
//! the Iced GUI framework.
//!
//! Its core is the filter state management flow for the signals feature:
//! two explicit stores holding the live filter state and the signal draft, a
//! clear-filters action that resets both atomically, and a bridge that turns
//! drawer confirmations into server-side signal updates.

#![doc(html_root_url = "https://docs.rs/signal_desk/0.1.0")]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod filters;
pub mod signal;
pub mod stores;
pub mod ui;
