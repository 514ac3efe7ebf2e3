//! The node-local key-value map.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::protocol::SnapshotEntry;

/// One stored key.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub value: String,
    pub version: u64,
}

/// In-memory store for one node.
///
/// Coordinated writes arrive with the router-assigned version and the node
/// adopts it verbatim. A version-less put (the standalone surface) bumps the
/// node's own per-key count instead.
pub struct LocalStore {
    entries: DashMap<String, StoredEntry>,
    /// Global counter value received with the last snapshot install.
    snapshot_version: AtomicU64,
}

impl LocalStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            snapshot_version: AtomicU64::new(0),
        }
    }

    /// Store one key. Returns the version now held for it.
    pub fn put(&self, key: &str, value: &str, version: Option<u64>) -> u64 {
        match version {
            Some(version) => {
                self.entries.insert(
                    key.to_string(),
                    StoredEntry {
                        value: value.to_string(),
                        version,
                    },
                );
                version
            }
            None => {
                let mut entry = self
                    .entries
                    .entry(key.to_string())
                    .or_insert_with(|| StoredEntry {
                        value: String::new(),
                        version: 0,
                    });
                entry.version += 1;
                entry.value = value.to_string();
                entry.version
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<StoredEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Wholesale snapshot install: replace the whole map with the router's
    /// authoritative state.
    pub fn install(&self, entries: Vec<SnapshotEntry>, version: u64) {
        self.entries.clear();
        for entry in entries {
            self.entries.insert(
                entry.key,
                StoredEntry {
                    value: entry.value,
                    version: entry.version,
                },
            );
        }
        self.snapshot_version.store(version, Ordering::SeqCst);
    }

    pub fn snapshot_version(&self) -> u64 {
        self.snapshot_version.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newline-joined `key:value` lines, sorted by key.
    pub fn dump(&self) -> String {
        let mut pairs: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().value.clone()))
            .collect();
        pairs.sort();
        pairs
            .into_iter()
            .map(|(key, value)| format!("{}:{}", key, value))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Drop all local state (normal-shutdown semantics).
    pub fn clear(&self) {
        self.entries.clear();
        self.snapshot_version.store(0, Ordering::SeqCst);
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}
