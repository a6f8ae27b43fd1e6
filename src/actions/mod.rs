//! User-triggered copy actions.
//!
//! The host reports menu clicks and hotkeys as a [`Trigger`] plus an
//! [`ActionContext`] describing what is open in the editor. The
//! [`ActionDispatcher`] reads what it needs from the store, formats it, hands
//! the text to the clipboard sink and reports an [`ActionOutcome`]. Guard
//! conditions are ordinary outcome variants rather than errors, and the
//! outcome is turned into a user notice only at the boundary.
//!
//! # Example
//!
//! ```
//! use repeater_history::actions::{
//!     ActionContext, ActionDispatcher, ActionOutcome, MemoryClipboard, Trigger,
//! };
//! use repeater_history::capture::TabHistoryStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(TabHistoryStore::new());
//! let clipboard = Arc::new(MemoryClipboard::new());
//! let dispatcher = ActionDispatcher::new(store, clipboard.clone());
//!
//! let outcome = dispatcher.dispatch(Trigger::CopyTabHistory, &ActionContext::empty());
//! assert_eq!(outcome, ActionOutcome::NoContext);
//! assert_eq!(clipboard.contents(), None);
//! ```

pub mod clipboard;
pub mod notice;

pub use clipboard::{ClipboardError, ClipboardSink, MemoryClipboard};
pub use notice::{LogNotices, Notice, NoticeLevel, NoticeSink};

use crate::capture::{derive_key, EventRecord, StoreError, TabHistoryStore};
use crate::formatter::{format_all_history, format_history, format_single};
use crate::models::{HttpRequest, HttpResponse};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Label used for the single-exchange report.
pub const CURRENT_LABEL: &str = "CURRENT";

const CAPTURE_HINT: &str = "This extension captures requests sent AFTER it was loaded.\n\
                            Use 'Copy Current Request/Response' to copy what's visible now.";

/// A user action the dispatcher can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Copy the request/response open in the editor.
    CopyCurrent,
    /// Copy everything captured for the open request's destination.
    CopyTabHistory,
    /// Copy everything captured in this session.
    CopyAllHistory,
}

impl Trigger {
    /// Menu label for the action.
    pub fn label(&self) -> &'static str {
        match self {
            Trigger::CopyCurrent => "Copy Current Request/Response",
            Trigger::CopyTabHistory => "Copy Tab History",
            Trigger::CopyAllHistory => "Copy All Captured History",
        }
    }
}

/// What the user had open when the action was triggered.
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    selection: Option<EventRecord>,
}

impl ActionContext {
    /// No message editor is open.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A message editor is open showing the given request and response.
    pub fn with_selection(request: Option<HttpRequest>, response: Option<HttpResponse>) -> Self {
        Self {
            selection: Some(EventRecord::from_parts(request, response)),
        }
    }

    pub fn selection(&self) -> Option<&EventRecord> {
        self.selection.as_ref()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }
}

/// What was copied by a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyScope {
    /// The open request/response.
    Current,
    /// The history of one destination.
    Tab(String),
    /// The whole session.
    All,
}

/// Result of one dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Text was placed on the clipboard.
    Copied { scope: CopyScope, entries: usize },

    /// No request/response is open.
    NoContext,

    /// An editor is open but holds no request.
    MissingRequest,

    /// Nothing has been captured yet for the destination (`Some`) or at all (`None`).
    EmptyHistory { key: Option<String> },

    /// The clipboard rejected the text.
    SinkError(String),

    /// Any other failure.
    Unexpected(String),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Copied { .. })
    }

    /// The notice to show the user for this outcome.
    pub fn notice(&self, title: &str) -> Notice {
        match self {
            ActionOutcome::Copied {
                scope: CopyScope::Current,
                ..
            } => Notice::info(title, "Copied current request/response to clipboard"),
            ActionOutcome::Copied {
                scope: CopyScope::Tab(key),
                entries,
            } => Notice::info(
                title,
                format!(
                    "Copied {} captured history entries for {} to clipboard",
                    entries, key
                ),
            ),
            ActionOutcome::Copied {
                scope: CopyScope::All,
                entries,
            } => Notice::info(
                title,
                format!("Copied {} captured history entries to clipboard", entries),
            ),
            ActionOutcome::NoContext => Notice::info(title, "No request/response data available"),
            ActionOutcome::MissingRequest => Notice::info(title, "No request data available"),
            ActionOutcome::EmptyHistory { key: Some(key) } => Notice::info(
                title,
                format!(
                    "No captured history for this tab ({}).\n\n{}",
                    key, CAPTURE_HINT
                ),
            ),
            ActionOutcome::EmptyHistory { key: None } => Notice::info(
                title,
                format!("No captured history available.\n\n{}", CAPTURE_HINT),
            ),
            ActionOutcome::SinkError(msg) => {
                Notice::error(title, format!("Failed to copy to clipboard: {}", msg))
            }
            ActionOutcome::Unexpected(msg) => {
                Notice::error(title, format!("Error copying history: {}", msg))
            }
        }
    }
}

/// Internal failure of a copy action; every variant maps onto an outcome.
#[derive(Debug)]
enum DispatchError {
    NoContext,
    MissingRequest,
    EmptyHistory(Option<String>),
    Sink(ClipboardError),
    Store(StoreError),
    Panicked(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoContext => write!(f, "no request/response open"),
            DispatchError::MissingRequest => write!(f, "open editor has no request"),
            DispatchError::EmptyHistory(Some(key)) => write!(f, "no history for {}", key),
            DispatchError::EmptyHistory(None) => write!(f, "no history captured"),
            DispatchError::Sink(e) => write!(f, "{}", e),
            DispatchError::Store(e) => write!(f, "{}", e),
            DispatchError::Panicked(msg) => write!(f, "panicked: {}", msg),
        }
    }
}

impl From<ClipboardError> for DispatchError {
    fn from(err: ClipboardError) -> Self {
        DispatchError::Sink(err)
    }
}

impl From<StoreError> for DispatchError {
    fn from(err: StoreError) -> Self {
        DispatchError::Store(err)
    }
}

impl From<DispatchError> for ActionOutcome {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::NoContext => ActionOutcome::NoContext,
            DispatchError::MissingRequest => ActionOutcome::MissingRequest,
            DispatchError::EmptyHistory(key) => ActionOutcome::EmptyHistory { key },
            DispatchError::Sink(e) => ActionOutcome::SinkError(e.to_string()),
            DispatchError::Store(e) => ActionOutcome::Unexpected(e.to_string()),
            DispatchError::Panicked(msg) => ActionOutcome::Unexpected(msg),
        }
    }
}

/// Runs copy actions against a shared store.
#[derive(Clone)]
pub struct ActionDispatcher {
    store: Arc<TabHistoryStore>,
    clipboard: Arc<dyn ClipboardSink>,
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ActionDispatcher {
    pub fn new(store: Arc<TabHistoryStore>, clipboard: Arc<dyn ClipboardSink>) -> Self {
        Self { store, clipboard }
    }

    /// Performs `trigger` and reports how it went.
    ///
    /// The clipboard is only written on success. A panic inside the action,
    /// including one raised by the clipboard sink, is caught and reported as
    /// [`ActionOutcome::Unexpected`].
    pub fn dispatch(&self, trigger: Trigger, context: &ActionContext) -> ActionOutcome {
        self.run(trigger, || match trigger {
            Trigger::CopyCurrent => self.copy_current(context),
            Trigger::CopyTabHistory => self.copy_tab_history(context),
            Trigger::CopyAllHistory => self.copy_all_history(),
        })
    }

    /// Copies the history captured under the grouping key `key`, without
    /// needing an open request.
    pub fn dispatch_for_key(&self, key: &str) -> ActionOutcome {
        self.run(Trigger::CopyTabHistory, || {
            self.copy_key_history(key.to_string())
        })
    }

    fn run<F>(&self, trigger: Trigger, action: F) -> ActionOutcome
    where
        F: FnOnce() -> Result<ActionOutcome, DispatchError>,
    {
        let result = panic::catch_unwind(AssertUnwindSafe(action)).unwrap_or_else(|payload| {
            Err(DispatchError::Panicked(panic_message(payload.as_ref())))
        });

        match result {
            Ok(outcome) => {
                if let ActionOutcome::Copied { entries, .. } = &outcome {
                    log::info!(
                        "Successfully copied {} ({} entries) to clipboard",
                        trigger.label(),
                        entries
                    );
                }
                outcome
            }
            Err(err) => {
                match &err {
                    DispatchError::Sink(_)
                    | DispatchError::Store(_)
                    | DispatchError::Panicked(_) => {
                        log::error!("{} failed: {}", trigger.label(), err)
                    }
                    _ => log::info!("{}: {}", trigger.label(), err),
                }
                err.into()
            }
        }
    }

    fn copy_current(&self, context: &ActionContext) -> Result<ActionOutcome, DispatchError> {
        let selection = context.selection().ok_or(DispatchError::NoContext)?;
        if selection.request().is_none() {
            return Err(DispatchError::MissingRequest);
        }

        self.clipboard
            .set_contents(&format_single(selection, CURRENT_LABEL))?;

        Ok(ActionOutcome::Copied {
            scope: CopyScope::Current,
            entries: 1,
        })
    }

    fn copy_tab_history(&self, context: &ActionContext) -> Result<ActionOutcome, DispatchError> {
        let request = context
            .selection()
            .ok_or(DispatchError::NoContext)?
            .request()
            .ok_or(DispatchError::MissingRequest)?;

        self.copy_key_history(derive_key(request))
    }

    fn copy_key_history(&self, key: String) -> Result<ActionOutcome, DispatchError> {
        let history = self.store.snapshot(&key)?;
        if history.is_empty() {
            return Err(DispatchError::EmptyHistory(Some(key)));
        }

        self.clipboard
            .set_contents(&format_history(&history, &key))?;

        Ok(ActionOutcome::Copied {
            scope: CopyScope::Tab(key),
            entries: history.len(),
        })
    }

    fn copy_all_history(&self) -> Result<ActionOutcome, DispatchError> {
        let history = self.store.snapshot_all()?;
        if history.is_empty() {
            return Err(DispatchError::EmptyHistory(None));
        }

        self.clipboard.set_contents(&format_all_history(&history))?;

        Ok(ActionOutcome::Copied {
            scope: CopyScope::All,
            entries: history.len(),
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|msg| msg.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
