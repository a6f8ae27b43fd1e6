//! Repeater history capture and copy.
//!
//! This crate records the HTTP traffic a manual-testing tool sends, grouped
//! by destination, and copies it out as plain-text reports on request.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Captured HTTP requests, responses and traffic source tags
//! - **parser**: Turns raw wire bytes from the host into models
//! - **capture**: Destination keys, event records, the concurrent history
//!   store and the capture hook
//! - **formatter**: Renders records into the fixed text report layout
//! - **actions**: Copy actions, their outcomes, clipboard and notice sinks
//! - **config**: User settings, key bindings and their validation
//! - **extension**: Wires everything together for one host session
//!
//! # Data flow
//!
//! Writes come from the host's network threads: every completed exchange is
//! passed to [`capture::CaptureHook`], which appends it to the
//! [`capture::TabHistoryStore`] under its `host:port` key if it came from the
//! configured tool. Reads come from user actions: the
//! [`actions::ActionDispatcher`] snapshots the relevant history, formats it
//! and puts the text on the clipboard.
//!
//! # Usage
//!
//! ```
//! use repeater_history::actions::{ActionContext, LogNotices, MemoryClipboard, Trigger};
//! use repeater_history::config::HistoryCopyConfig;
//! use repeater_history::extension::HistoryCopyExtension;
//! use repeater_history::models::{
//!     HttpMethod, HttpRequest, HttpResponse, HttpService, ToolType,
//! };
//! use std::sync::Arc;
//!
//! let clipboard = Arc::new(MemoryClipboard::new());
//! let extension = HistoryCopyExtension::new(
//!     HistoryCopyConfig::default(),
//!     clipboard.clone(),
//!     Arc::new(LogNotices),
//! );
//!
//! let service = HttpService::new("example.com", 443, true);
//! let request = HttpRequest::new(service, HttpMethod::GET, "/");
//! extension
//!     .hook()
//!     .on_exchange_complete(&request, &HttpResponse::new(200, "OK"), ToolType::Repeater);
//!
//! let context = ActionContext::with_selection(Some(request), None);
//! assert!(extension.handle(Trigger::CopyTabHistory, &context).is_success());
//! assert!(clipboard.contents().unwrap().contains("Tab: example.com:443"));
//! ```

pub mod actions;
pub mod capture;
pub mod config;
pub mod extension;
pub mod formatter;
pub mod models;
pub mod parser;

pub use actions::{ActionContext, ActionDispatcher, ActionOutcome, Trigger};
pub use capture::{derive_key, CaptureHook, EventRecord, TabHistoryStore};
pub use extension::HistoryCopyExtension;
