//! The authoritative log.
//!
//! The router's in-memory record of the latest value and version per key.
//! This is the source of truth: replicas are a read optimization that can
//! lag behind it, never the other way around.
//!
//! Versions come from a single `AtomicU64` shared across all keys, so they
//! impose a total order over the whole log. The counter is deliberately not
//! guarded by the per-key locks — two writers on different keys must still
//! draw distinct versions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::node::protocol::{SnapshotEntry, SnapshotRequest};

/// Latest accepted state for one key.
#[derive(Debug, Clone)]
pub struct KeyEntry {
    pub value: String,
    pub version: u64,
}

pub struct AuthoritativeLog {
    entries: DashMap<String, KeyEntry>,
    /// Global monotonic version counter, shared across all keys.
    version_counter: AtomicU64,
    /// Per-key write locks, created lazily on first write and kept for the
    /// lifetime of the process.
    key_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AuthoritativeLog {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            version_counter: AtomicU64::new(0),
            key_locks: DashMap::new(),
        }
    }

    /// The write lock for `key`. The map's entry API makes lazy creation a
    /// single short-held critical section, so concurrent first writers to
    /// the same key still end up sharing one mutex.
    pub fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.key_locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Assign the next global version to `(key, value)` and record it.
    ///
    /// Callers must hold the key's write lock; the atomic counter alone
    /// guarantees version uniqueness, the lock guarantees the log and the
    /// replicas see this key's writes in one order.
    pub fn record(&self, key: &str, value: &str) -> u64 {
        let version = self.version_counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.entries.insert(
            key.to_string(),
            KeyEntry {
                value: value.to_string(),
                version,
            },
        );
        version
    }

    /// The version the router last recorded for `key`.
    pub fn version_of(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.version)
    }

    pub fn entry(&self, key: &str) -> Option<KeyEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Current value of the global version counter.
    pub fn current_version(&self) -> u64 {
        self.version_counter.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full snapshot for anti-entropy pushes: every entry plus the counter.
    pub fn snapshot(&self) -> SnapshotRequest {
        let entries = self
            .entries
            .iter()
            .map(|entry| SnapshotEntry {
                key: entry.key().clone(),
                value: entry.value().value.clone(),
                version: entry.value().version,
            })
            .collect();

        SnapshotRequest {
            entries,
            version: self.current_version(),
        }
    }
}

impl Default for AuthoritativeLog {
    fn default() -> Self {
        Self::new()
    }
}
