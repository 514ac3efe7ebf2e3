//! Storage-Node Network Protocol
//!
//! Defines the API endpoints and DTOs the router uses to talk to a storage
//! node (write fan-out, freshness reads, snapshot installs, heartbeats).
//!
//! These structures are serialized as JSON and sent over HTTP.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Write one key-value pair into the node's local map.
pub const ENDPOINT_PUT: &str = "/kv";
/// Read one key-value pair (`GET /kv/:key`).
pub const ENDPOINT_GET: &str = "/kv";
/// Install a full snapshot of the authoritative log (anti-entropy).
pub const ENDPOINT_SNAPSHOT: &str = "/snapshot";
/// Lightweight liveness probe.
pub const ENDPOINT_HEARTBEAT: &str = "/heartbeat";
/// Newline-joined `key:value` dump of the node's local map.
pub const ENDPOINT_PAIRS: &str = "/pairs";
/// Ask the node to stop serving.
pub const ENDPOINT_SHUTDOWN: &str = "/shutdown";

// --- Data Transfer Objects ---

/// A single write pushed by the router (or a standalone client).
///
/// When the router fans out a coordinated write it includes the version it
/// assigned, so the node can echo a number comparable against the router's
/// authoritative log. A request without a version falls back to the node's
/// own per-key count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutEntryRequest {
    /// The data key.
    pub key: String,
    /// The value to store.
    pub value: String,
    /// Router-assigned version, if this write is a coordinated fan-out.
    pub version: Option<u64>,
}

/// The node's view of one key at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEntryResponse {
    pub value: String,
    /// The version the node holds for this key. The router judges freshness
    /// by comparing this against its authoritative version.
    pub version: u64,
}

/// One entry of a snapshot transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub key: String,
    pub value: String,
    pub version: u64,
}

/// Full-state resync payload: the router's entire authoritative log plus the
/// current global version counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRequest {
    pub entries: Vec<SnapshotEntry>,
    /// Value of the global version counter at snapshot time.
    pub version: u64,
}

/// Generic acknowledgment for node-side writes and control calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAck {
    pub ok: bool,
}
