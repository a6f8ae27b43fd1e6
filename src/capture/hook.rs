//! Capture hook for completed exchanges.
//!
//! The host calls the hook twice per exchange: once when the request is
//! about to be sent and once when the response has arrived. The hook is a
//! pure observer. It never alters a message and always lets the exchange
//! continue; recording happens on the response side only, and only for
//! traffic from the configured tool.

use super::key::derive_key;
use super::record::EventRecord;
use super::store::TabHistoryStore;
use crate::models::{HttpRequest, HttpResponse, ToolType};
use std::sync::Arc;

/// What the host should do with a request after the hook has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    /// Send the request unchanged.
    Continue,
}

/// Where one exchange ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The exchange was appended to the history for `key`.
    Captured {
        key: String,
        /// 1-based position of the new record within the key's history
        position: usize,
    },

    /// The exchange came from another tool and was not recorded.
    Abandoned(ToolType),

    /// Recording failed; the error has been logged and the exchange continues.
    Failed { key: String },
}

impl CaptureOutcome {
    pub fn is_captured(&self) -> bool {
        matches!(self, CaptureOutcome::Captured { .. })
    }
}

/// Records completed exchanges from one tool into a [`TabHistoryStore`].
#[derive(Debug, Clone)]
pub struct CaptureHook {
    store: Arc<TabHistoryStore>,
    source: ToolType,
}

impl CaptureHook {
    /// Creates a hook that records traffic from `source` into `store`.
    pub fn new(store: Arc<TabHistoryStore>, source: ToolType) -> Self {
        Self { store, source }
    }

    /// The tool whose traffic this hook records.
    pub fn source(&self) -> ToolType {
        self.source
    }

    /// Called when a request is about to be sent.
    ///
    /// Nothing is recorded until the response arrives.
    pub fn on_request_to_be_sent(&self, request: &HttpRequest, source: ToolType) -> RequestAction {
        if source == self.source {
            log::trace!(
                "Observed {} {} to {} from {}",
                request.method,
                request.path,
                request.service,
                source
            );
        }
        RequestAction::Continue
    }

    /// Called when the response for `request` has been received.
    ///
    /// Appends exactly one record for qualifying traffic. Store failures are
    /// logged and reported through the outcome; they never reach the caller
    /// as an error or a panic.
    pub fn on_exchange_complete(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        source: ToolType,
    ) -> CaptureOutcome {
        if source != self.source {
            return CaptureOutcome::Abandoned(source);
        }

        let key = derive_key(request);
        let record = EventRecord::new(request.clone(), response.clone());

        match self.store.append(&key, record) {
            Ok(position) => {
                log::debug!(
                    "Captured {} {} -> {} as entry #{} for {}",
                    request.method,
                    request.path,
                    response.status_code,
                    position,
                    key
                );
                CaptureOutcome::Captured { key, position }
            }
            Err(e) => {
                log::error!("Failed to capture exchange for {}: {}", key, e);
                CaptureOutcome::Failed { key }
            }
        }
    }
}
