// SPDX-License-Identifier: MPL-2.0
//! The signal entity and the pure transform that turns a drawer confirmation
//! into an update request.

use crate::filters::FilterState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery cadence of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Schedule::Daily => "Daily",
            Schedule::Weekly => "Weekly",
            Schedule::Monthly => "Monthly",
        };
        write!(f, "{label}")
    }
}

/// A signal as held by the server: metadata plus zero-or-one active filter
/// state, owned by value.
///
/// The client only ever holds a cached copy; staleness is resolved by the
/// cache invalidation performed after a successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub name: String,
    pub schedule: Schedule,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub filters: FilterState,
}

/// Serialized form of one update: the signal's id and unchanged metadata plus
/// the next filter state. Built fresh on every apply, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSignalRequest {
    pub id: String,
    pub name: String,
    pub schedule: Schedule,
    pub filters: FilterState,
}

/// Builds the update request for applying `next` to `signal`.
///
/// Pure: reads both arguments, mutates neither, and always produces a
/// structurally equal request for equal inputs. The signal's existing filter
/// state is fully replaced by `next` (replace-semantics, not a field-by-field
/// merge); non-filter metadata is carried over unchanged.
#[must_use]
pub fn build_update_params(signal: &Signal, next: &FilterState) -> UpdateSignalRequest {
    UpdateSignalRequest {
        id: signal.id.clone(),
        name: signal.name.clone(),
        schedule: signal.schedule,
        filters: next.clone(),
    }
}
