//! HTTP client for the router → storage-node RPC surface.
//!
//! Every call carries a bounded timeout so a single unreachable node can
//! never stall a coordinator or the failure detector; a timed-out call is
//! indistinguishable from a failed one. Outcomes are explicit results that
//! the coordinators pattern-match, and a failure here is never fatal — it
//! becomes a membership transition upstream.

use std::time::Duration;

use thiserror::Error;

use crate::node::protocol::{
    GetEntryResponse, NodeAck, PutEntryRequest, SnapshotRequest, ENDPOINT_GET,
    ENDPOINT_HEARTBEAT, ENDPOINT_PAIRS, ENDPOINT_PUT, ENDPOINT_SHUTDOWN, ENDPOINT_SNAPSHOT,
};

/// Outcome of a single replica call.
#[derive(Debug, Error)]
pub enum ReplicaError {
    /// Transport failure or timeout; the node may be down or partitioned.
    #[error("replica unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The node answered with a non-success status.
    #[error("replica rejected the request: {0}")]
    Rejected(reqwest::StatusCode),
}

/// Thin wrapper over one shared `reqwest::Client`.
///
/// Cheap to clone; all clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReplicaClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl ReplicaClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
        }
    }

    /// Push one write to a node. `version` is the router-assigned version
    /// for coordinated writes.
    pub async fn put(
        &self,
        addr: &str,
        key: &str,
        value: &str,
        version: u64,
    ) -> Result<(), ReplicaError> {
        let payload = PutEntryRequest {
            key: key.to_string(),
            value: value.to_string(),
            version: Some(version),
        };
        let response = self
            .http
            .post(format!("http://{}{}", addr, ENDPOINT_PUT))
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReplicaError::Rejected(response.status()));
        }
        Ok(())
    }

    /// Fetch a node's `(value, version)` for a key. `Ok(None)` means the
    /// node has never seen the key.
    pub async fn get(&self, addr: &str, key: &str) -> Result<Option<(String, u64)>, ReplicaError> {
        let response = self
            .http
            .get(format!("http://{}{}/{}", addr, ENDPOINT_GET, key))
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ReplicaError::Rejected(response.status()));
        }

        let body: GetEntryResponse = response.json().await?;
        Ok(Some((body.value, body.version)))
    }

    /// Install a full snapshot on a node in one call.
    pub async fn load_snapshot(
        &self,
        addr: &str,
        snapshot: &SnapshotRequest,
    ) -> Result<(), ReplicaError> {
        let response = self
            .http
            .post(format!("http://{}{}", addr, ENDPOINT_SNAPSHOT))
            .json(snapshot)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReplicaError::Rejected(response.status()));
        }
        let ack: NodeAck = response.json().await?;
        if !ack.ok {
            return Err(ReplicaError::Rejected(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }

    /// Liveness probe.
    pub async fn heartbeat(&self, addr: &str) -> Result<(), ReplicaError> {
        let response = self
            .http
            .get(format!("http://{}{}", addr, ENDPOINT_HEARTBEAT))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReplicaError::Rejected(response.status()));
        }
        Ok(())
    }

    /// Newline-joined `key:value` dump of one node's local map.
    pub async fn dump(&self, addr: &str) -> Result<String, ReplicaError> {
        let response = self
            .http
            .get(format!("http://{}{}", addr, ENDPOINT_PAIRS))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReplicaError::Rejected(response.status()));
        }
        Ok(response.text().await?)
    }

    /// Courtesy shutdown request; best-effort by design.
    pub async fn shutdown(&self, addr: &str) -> Result<(), ReplicaError> {
        let response = self
            .http
            .post(format!("http://{}{}", addr, ENDPOINT_SHUTDOWN))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReplicaError::Rejected(response.status()));
        }
        Ok(())
    }
}
