// SPDX-License-Identifier: MPL-2.0
//! Asynchronous mutation channel to the signal server, plus the client-side
//! signal cache it invalidates.
//!
//! The client issues plain JSON requests with `reqwest`. Updates are
//! at-most-once per invocation: no retry lives at this layer, and failures are
//! returned to the caller untransformed beyond categorization into
//! [`ApiError`] variants.

use crate::error::ApiError;
use crate::filters::SavedFilter;
use crate::signal::{Signal, UpdateSignalRequest};
use std::collections::HashMap;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// HTTP client for the signal server. Cheap to clone; clones share the
/// underlying connection pool, which is what lets update tasks move into
/// `iced::Task::perform` futures.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL. A trailing slash is trimmed
    /// so path joining stays predictable.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches all signals owned by the current user.
    pub async fn fetch_signals(&self) -> Result<Vec<Signal>, ApiError> {
        let url = format!("{}/signals", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| ApiError::from_request_error(&e))?;

        let response = response
            .error_for_status()
            .map_err(|e| ApiError::from_request_error(&e))?;

        response
            .json::<Vec<Signal>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetches the user's saved filter sets.
    pub async fn fetch_saved_filters(&self) -> Result<Vec<SavedFilter>, ApiError> {
        let url = format!("{}/saved-filters", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| ApiError::from_request_error(&e))?;

        let response = response
            .error_for_status()
            .map_err(|e| ApiError::from_request_error(&e))?;

        response
            .json::<Vec<SavedFilter>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Persists an update built by `build_update_params` and returns the
    /// server's view of the signal.
    ///
    /// On success the caller must invalidate any cached copy of this signal
    /// and replace it with the returned value.
    pub async fn update_signal(&self, request: &UpdateSignalRequest) -> Result<Signal, ApiError> {
        if request.id.is_empty() {
            return Err(ApiError::InvalidRequest(
                "signal id must not be empty".to_string(),
            ));
        }

        let url = format!("{}/signals/{}", self.base_url, request.id);
        let response = self
            .http
            .put(&url)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::from_request_error(&e))?;

        let response = response
            .error_for_status()
            .map_err(|e| ApiError::from_request_error(&e))?;

        response
            .json::<Signal>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Client-side cache of server-confirmed signals, keyed by id.
///
/// The cache only ever holds values the server has confirmed; a successful
/// update invalidates the stale entry and inserts the response.
#[derive(Debug, Clone, Default)]
pub struct SignalCache {
    entries: HashMap<String, Signal>,
}

impl SignalCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Signal> {
        self.entries.get(id)
    }

    /// Replaces the whole cache with a freshly fetched signal list.
    pub fn replace_all(&mut self, signals: Vec<Signal>) {
        self.entries = signals
            .into_iter()
            .map(|signal| (signal.id.clone(), signal))
            .collect();
    }

    /// Drops the cached copy of one signal.
    pub fn invalidate(&mut self, id: &str) {
        self.entries.remove(id);
    }

    /// Stores a server-confirmed signal.
    pub fn insert(&mut self, signal: Signal) {
        self.entries.insert(signal.id.clone(), signal);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
