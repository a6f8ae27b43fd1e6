//! Extension lifecycle.
//!
//! [`HistoryCopyExtension`] is what the host loads. It owns the history store
//! for the session and wires it into the capture hook (write side) and the
//! action dispatcher (read side). The host registers [`HistoryCopyExtension::hook`]
//! with its HTTP pipeline, asks [`HistoryCopyExtension::menu_items`] for the
//! context menu, and forwards clicks and key chords to
//! [`HistoryCopyExtension::handle`].

use crate::actions::{
    ActionContext, ActionDispatcher, ActionOutcome, ClipboardSink, NoticeSink, Trigger,
};
use crate::capture::{CaptureHook, TabHistoryStore};
use crate::config::{HistoryCopyConfig, KeyChord};
use std::fmt;
use std::sync::Arc;

/// A context-menu entry offered to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub trigger: Trigger,
}

/// The loaded extension: one store, one hook, one dispatcher.
pub struct HistoryCopyExtension {
    config: HistoryCopyConfig,
    store: Arc<TabHistoryStore>,
    hook: CaptureHook,
    dispatcher: ActionDispatcher,
    notices: Arc<dyn NoticeSink>,
    bindings: Vec<(KeyChord, Trigger)>,
}

impl fmt::Debug for HistoryCopyExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryCopyExtension")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

impl HistoryCopyExtension {
    /// Builds the extension with an empty store.
    ///
    /// An invalid configuration is logged but still used. Key bindings that
    /// fail to parse, or repeat a chord already bound, are logged and skipped;
    /// loading never fails.
    pub fn new(
        config: HistoryCopyConfig,
        clipboard: Arc<dyn ClipboardSink>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("{} configuration is invalid: {}", config.extension_name, e);
        }

        let store = Arc::new(TabHistoryStore::new());
        let hook = CaptureHook::new(Arc::clone(&store), config.capture_tool);
        let dispatcher = ActionDispatcher::new(Arc::clone(&store), clipboard);
        let bindings = resolve_bindings(&config);

        log::info!(
            "{} extension loaded successfully (capturing {} traffic)",
            config.extension_name,
            config.capture_tool
        );

        Self {
            config,
            store,
            hook,
            dispatcher,
            notices,
            bindings,
        }
    }

    /// Name the host should display for the extension.
    pub fn name(&self) -> &str {
        &self.config.extension_name
    }

    pub fn config(&self) -> &HistoryCopyConfig {
        &self.config
    }

    /// The session's history store.
    pub fn store(&self) -> &Arc<TabHistoryStore> {
        &self.store
    }

    /// The hook to register with the host's HTTP pipeline.
    pub fn hook(&self) -> &CaptureHook {
        &self.hook
    }

    /// The history action offered next to "copy current".
    pub fn history_trigger(&self) -> Trigger {
        history_trigger(&self.config)
    }

    /// Context-menu entries for `context`.
    ///
    /// Items are only offered inside a message editor, i.e. when something
    /// is open.
    pub fn menu_items(&self, context: &ActionContext) -> Vec<MenuItem> {
        if !context.has_selection() {
            return Vec::new();
        }

        [Trigger::CopyCurrent, self.history_trigger()]
            .into_iter()
            .map(|trigger| MenuItem {
                label: trigger.label(),
                trigger,
            })
            .collect()
    }

    /// Maps a key chord reported by the host to a bound action.
    pub fn trigger_for_key_chord(&self, chord: &str) -> Option<Trigger> {
        let chord: KeyChord = chord.parse().ok()?;
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == chord)
            .map(|(_, trigger)| *trigger)
    }

    /// Runs `trigger` and shows the resulting notice.
    pub fn handle(&self, trigger: Trigger, context: &ActionContext) -> ActionOutcome {
        let outcome = self.dispatcher.dispatch(trigger, context);
        self.notify(&outcome);
        outcome
    }

    /// Copies the history of one grouping key (`host:port`) and shows the
    /// resulting notice.
    pub fn handle_key(&self, key: &str) -> ActionOutcome {
        let outcome = self.dispatcher.dispatch_for_key(key);
        self.notify(&outcome);
        outcome
    }

    fn notify(&self, outcome: &ActionOutcome) {
        self.notices
            .show(&outcome.notice(&self.config.notice_title));
    }
}

fn history_trigger(config: &HistoryCopyConfig) -> Trigger {
    if config.group_by_destination {
        Trigger::CopyTabHistory
    } else {
        Trigger::CopyAllHistory
    }
}

fn resolve_bindings(config: &HistoryCopyConfig) -> Vec<(KeyChord, Trigger)> {
    let configured = [
        (
            config.key_bindings.copy_current.as_deref(),
            Trigger::CopyCurrent,
        ),
        (
            config.key_bindings.copy_history.as_deref(),
            history_trigger(config),
        ),
    ];

    let mut bindings: Vec<(KeyChord, Trigger)> = Vec::new();
    for (binding, trigger) in configured {
        let Some(binding) = binding else {
            continue;
        };
        let chord = match binding.parse::<KeyChord>() {
            Ok(chord) => chord,
            Err(e) => {
                log::warn!("Ignoring key binding for {}: {}", trigger.label(), e);
                continue;
            }
        };
        if let Some((_, bound)) = bindings.iter().find(|(existing, _)| *existing == chord) {
            log::warn!(
                "Ignoring key binding {} for {}: already bound to {}",
                chord,
                trigger.label(),
                bound.label()
            );
            continue;
        }
        bindings.push((chord, trigger));
    }
    bindings
}
