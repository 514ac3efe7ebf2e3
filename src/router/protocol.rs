//! Router Network Protocol
//!
//! The client-facing HTTP contract of the coordination tier. Requests carry
//! JSON bodies; replies are plain strings with distinguished `ERR_*` values,
//! so failures arrive as data rather than as transport faults.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Client write: insert or update one key.
pub const ENDPOINT_PUT: &str = "/put";
/// Client read (`GET /get/:key`).
pub const ENDPOINT_GET: &str = "/get";
/// Register a storage node with the cluster.
pub const ENDPOINT_ADD_SERVER: &str = "/servers/add";
/// Shut a storage node down and drop it from the registry.
pub const ENDPOINT_SHUTDOWN_SERVER: &str = "/servers/shutdown";
/// Sorted list of known node ids.
pub const ENDPOINT_LIST_SERVERS: &str = "/servers";
/// Dump one node's key-value pairs (`GET /pairs/:id`).
pub const ENDPOINT_KV_PAIRS: &str = "/pairs";

// --- Data Transfer Objects ---

/// Client write request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutRequest {
    pub key: String,
    pub value: String,
}

/// Request targeting one node by id (add, shutdown).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerRequest {
    pub id: u32,
}
