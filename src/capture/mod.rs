//! Capture and indexing of manual-testing traffic.
//!
//! This module holds the stateful core of the crate:
//!
//! - [`derive_key`] maps a request to its destination group (`host:port`)
//! - [`EventRecord`] pairs one request with its response
//! - [`TabHistoryStore`] keeps an append-only history per group
//! - [`CaptureHook`] feeds completed exchanges from one tool into the store
//!
//! # Example
//!
//! ```
//! use repeater_history::capture::{CaptureHook, TabHistoryStore};
//! use repeater_history::models::{HttpMethod, HttpRequest, HttpResponse, HttpService, ToolType};
//! use std::sync::Arc;
//!
//! let store = Arc::new(TabHistoryStore::new());
//! let hook = CaptureHook::new(Arc::clone(&store), ToolType::Repeater);
//!
//! let service = HttpService::new("example.com", 443, true);
//! let request = HttpRequest::new(service, HttpMethod::GET, "/");
//! hook.on_exchange_complete(&request, &HttpResponse::new(200, "OK"), ToolType::Repeater);
//!
//! assert_eq!(store.snapshot("example.com:443").unwrap().len(), 1);
//! ```

pub mod hook;
pub mod key;
pub mod record;
pub mod store;

pub use hook::{CaptureHook, CaptureOutcome, RequestAction};
pub use key::derive_key;
pub use record::EventRecord;
pub use store::{StoreError, TabHistoryStore};
