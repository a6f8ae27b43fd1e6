//! Per-destination history store.
//!
//! The store maps a grouping key to the ordered list of records captured for
//! it. The outer map is a `DashMap`, which gives atomic insert-if-absent and
//! shard-level locking; each key's list sits behind its own `Mutex`. The map
//! guard is always released before a list lock is taken and no operation
//! holds two list locks, so captures for different destinations never wait
//! on each other.
//!
//! The store is append-only: keys are never removed and lists only grow.
//! Every append also draws a store-wide sequence number while its list lock
//! is held, which gives a single arrival order across all keys.

use super::record::EventRecord;
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// A record together with its position in the store-wide arrival order.
#[derive(Debug)]
struct Entry {
    sequence: u64,
    record: EventRecord,
}

type Tab = Arc<Mutex<Vec<Entry>>>;

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A thread panicked while holding the list lock for this key.
    Poisoned(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Poisoned(key) => {
                write!(f, "History for '{}' is unavailable: lock poisoned", key)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Concurrent, append-only history of captured records grouped by key.
///
/// Shared between the capture hook and the action dispatcher through an
/// `Arc`.
#[derive(Debug, Default)]
pub struct TabHistoryStore {
    tabs: DashMap<String, Tab>,
    next_sequence: AtomicU64,
}

impl TabHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            tabs: DashMap::new(),
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Appends a record to the end of `key`'s history, creating it on first use.
    ///
    /// # Returns
    ///
    /// The length of the key's history after the append.
    pub fn append(&self, key: &str, record: EventRecord) -> Result<usize, StoreError> {
        let tab = self.tab_or_insert(key);
        let mut entries = tab
            .lock()
            .map_err(|_| StoreError::Poisoned(key.to_string()))?;
        // Drawn under the list lock so per-key order and sequence order agree.
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        entries.push(Entry { sequence, record });
        Ok(entries.len())
    }

    /// Returns a copy of `key`'s history in capture order.
    ///
    /// Unknown keys yield an empty list and are not created. The returned
    /// vector is independent of the store, so later appends do not show up
    /// in it.
    pub fn snapshot(&self, key: &str) -> Result<Vec<EventRecord>, StoreError> {
        Ok(self
            .sequenced(key)?
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }

    /// Returns every captured record across all keys, in the order they
    /// reached the store.
    ///
    /// Each key is copied under its own lock, one at a time, so the result is
    /// consistent per key but not an atomic cut across keys. Records of one
    /// key keep their relative order.
    pub fn snapshot_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        let mut all = Vec::new();
        for key in self.keys() {
            all.extend(self.sequenced(&key)?);
        }
        all.sort_by_key(|(sequence, _)| *sequence);
        Ok(all.into_iter().map(|(_, record)| record).collect())
    }

    /// Keys that have at least one captured record.
    pub fn keys(&self) -> BTreeSet<String> {
        self.tabs.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of records captured for `key`.
    pub fn entry_count(&self, key: &str) -> usize {
        self.tab(key)
            .and_then(|tab| tab.lock().ok().map(|entries| entries.len()))
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Total number of records across all keys.
    pub fn total_entries(&self) -> usize {
        self.keys().iter().map(|key| self.entry_count(key)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    fn sequenced(&self, key: &str) -> Result<Vec<(u64, EventRecord)>, StoreError> {
        let Some(tab) = self.tab(key) else {
            return Ok(Vec::new());
        };
        let entries = tab
            .lock()
            .map_err(|_| StoreError::Poisoned(key.to_string()))?;
        Ok(entries
            .iter()
            .map(|entry| (entry.sequence, entry.record.clone()))
            .collect())
    }

    fn tab(&self, key: &str) -> Option<Tab> {
        self.tabs.get(key).map(|entry| Arc::clone(entry.value()))
    }

    fn tab_or_insert(&self, key: &str) -> Tab {
        if let Some(tab) = self.tab(key) {
            return tab;
        }
        let entry = self.tabs.entry(key.to_string()).or_default();
        Arc::clone(entry.value())
    }
}
