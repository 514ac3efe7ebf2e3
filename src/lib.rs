//! Replicated Key-Value Store
//!
//! This library crate defines the two tiers of the system: a stateful
//! coordination tier (the router) and a stateless storage tier (the nodes).
//! It serves as the foundation for the two binaries (`kvs-router`, `kvs-node`).
//!
//! ## Architecture Modules
//!
//! - **`membership`**: The router's view of the cluster. Tracks every known
//!   storage node, its address, its reachability state (`Live`/`Stale`) and
//!   its consecutive-missed-heartbeat count.
//! - **`router`**: The coordination tier. Serializes and versions writes per
//!   key against an authoritative in-memory log, fans writes out to live
//!   replicas, resolves reads with a monotonic version check, probes nodes
//!   for liveness and repairs stale replicas with full-snapshot pushes.
//! - **`node`**: The storage tier. A trivial in-memory map exposing
//!   put/get/snapshot/heartbeat/shutdown over HTTP. No replication logic
//!   lives here.
//! - **`client`**: The router's HTTP client for talking to storage nodes,
//!   with bounded timeouts and typed failure results.
//! - **`config`**: Tuning knobs (heartbeat rate, failure threshold, read
//!   retries) and deterministic node addressing.
//! - **`error`**: The router-level error taxonomy and its wire encoding.

pub mod client;
pub mod config;
pub mod error;
pub mod membership;
pub mod node;
pub mod router;
