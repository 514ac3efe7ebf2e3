//! Write and read coordination.
//!
//! The `Router` owns the two pieces of shared state — the membership
//! registry and the authoritative log — and implements every client-facing
//! operation against them. Replica RPCs always happen outside registry
//! locks, and replica failures are converted into membership transitions
//! rather than surfaced as operation failures.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::client::ReplicaClient;
use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::membership::registry::MembershipRegistry;
use crate::router::log::AuthoritativeLog;

/// Result of a coordinated write.
///
/// A write succeeds once the authoritative log is updated; nodes that missed
/// the fan-out are an informational annotation, not an error — they will be
/// repaired lazily.
#[derive(Debug, Clone)]
pub struct PutOutcome {
    /// Version assigned to this write by the global counter.
    pub version: u64,
    /// Number of replicas that acknowledged the write.
    pub replicated: usize,
    /// Nodes that failed the fan-out and were marked stale.
    pub stale: Vec<u32>,
}

/// Result of registering a node.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    /// Whether the initial snapshot push succeeded. A node that missed it is
    /// registered stale and caught up by the repair cycle.
    pub synced: bool,
}

pub struct Router {
    registry: Arc<MembershipRegistry>,
    log: Arc<AuthoritativeLog>,
    client: ReplicaClient,
    cfg: RouterConfig,
}

impl Router {
    pub fn new(cfg: RouterConfig) -> Arc<Self> {
        let client = ReplicaClient::new(cfg.rpc_timeout);
        Arc::new(Self {
            registry: Arc::new(MembershipRegistry::new()),
            log: Arc::new(AuthoritativeLog::new()),
            client,
            cfg,
        })
    }

    pub fn registry(&self) -> &MembershipRegistry {
        &self.registry
    }

    pub fn log(&self) -> &AuthoritativeLog {
        &self.log
    }

    pub fn client(&self) -> &ReplicaClient {
        &self.client
    }

    pub fn config(&self) -> &RouterConfig {
        &self.cfg
    }

    /// Coordinated write: serialize per key, version globally, fan out to
    /// the live set.
    pub async fn put(&self, key: &str, value: &str) -> Result<PutOutcome, RouterError> {
        if self.registry.is_empty() {
            return Err(RouterError::NoServers);
        }

        // Sole serialization point for this key: held across the version
        // assignment, the log update and the whole replica fan-out, so two
        // writers to one key cannot interleave their replica updates.
        let lock = self.log.key_lock(key);
        let _guard = lock.lock().await;

        let version = self.log.record(key, value);

        // Point-in-time snapshot of the live set; not reacquired mid-fan-out.
        let targets = self.registry.live_members();
        let mut replicated = 0;
        let mut stale = Vec::new();

        for member in &targets {
            match self.client.put(&member.addr, key, value, version).await {
                Ok(()) => replicated += 1,
                Err(err) => {
                    tracing::warn!(
                        "Write fan-out of {}@v{} to node {} failed: {}",
                        key,
                        version,
                        member.id,
                        err
                    );
                    self.registry.mark_stale(member.id);
                    stale.push(member.id);
                }
            }
        }

        tracing::debug!(
            "put {}@v{}: {}/{} replicas acknowledged",
            key,
            version,
            replicated,
            targets.len()
        );

        Ok(PutOutcome {
            version,
            replicated,
            stale,
        })
    }

    /// Version-gated read: try live replicas in randomized order and accept
    /// the first value at least as fresh as the authoritative version.
    pub async fn get(&self, key: &str) -> Result<String, RouterError> {
        let authoritative = self
            .log
            .version_of(key)
            .ok_or(RouterError::KeyNotFound)?;
        if self.registry.is_empty() {
            return Err(RouterError::NoServers);
        }

        let mut candidates = self.registry.live_members();
        candidates.shuffle(&mut rand::thread_rng());

        for member in candidates {
            for attempt in 0..self.cfg.read_retries {
                match self.client.get(&member.addr, key).await {
                    Ok(Some((value, version))) => {
                        if version >= authoritative {
                            return Ok(value);
                        }
                        // The replica is behind and not yet repaired;
                        // retrying the same node cannot freshen it.
                        tracing::debug!(
                            "Node {} behind on {} (v{} < v{})",
                            member.id,
                            key,
                            version,
                            authoritative
                        );
                        break;
                    }
                    Ok(None) => {
                        tracing::debug!("Node {} missing {}", member.id, key);
                        break;
                    }
                    Err(err) => {
                        tracing::debug!(
                            "Read of {} from node {} failed (attempt {}): {}",
                            key,
                            member.id,
                            attempt + 1,
                            err
                        );
                        if attempt + 1 < self.cfg.read_retries {
                            let jitter = rand::random::<u64>() % 50;
                            tokio::time::sleep(Duration::from_millis(25 + jitter)).await;
                        }
                    }
                }
            }
        }

        Err(RouterError::NoFreshReplica)
    }

    /// Register a node and seed it with the full authoritative log so it
    /// starts consistent.
    pub async fn add_server(&self, id: u32, addr: String) -> Result<AddOutcome, RouterError> {
        self.registry.add(id, addr.clone())?;

        let snapshot = self.log.snapshot();
        match self.client.load_snapshot(&addr, &snapshot).await {
            Ok(()) => {
                tracing::info!(
                    "Node {} seeded with {} entries (counter at {})",
                    id,
                    snapshot.entries.len(),
                    snapshot.version
                );
                // A concurrent fan-out may already have marked the node
                // stale; that is for the repair cycle to undo, not us.
                Ok(AddOutcome { synced: true })
            }
            Err(err) => {
                tracing::warn!("Initial snapshot push to node {} failed: {}", id, err);
                self.registry.mark_stale(id);
                Ok(AddOutcome { synced: false })
            }
        }
    }

    /// Courtesy shutdown, then unconditional removal from the registry.
    pub async fn shutdown_server(&self, id: u32) -> Result<(), RouterError> {
        let addr = self
            .registry
            .addr_of(id)
            .ok_or(RouterError::NodeNotFound(id))?;

        if let Err(err) = self.client.shutdown(&addr).await {
            tracing::warn!("Courtesy shutdown of node {} failed: {}", id, err);
        }
        self.registry.remove(id);
        Ok(())
    }

    /// Sorted ids of every known node.
    pub fn list_servers(&self) -> Vec<u32> {
        self.registry.ids()
    }

    /// One node's `key:value` dump.
    pub async fn kv_pairs(&self, id: u32) -> Result<String, RouterError> {
        let addr = self
            .registry
            .addr_of(id)
            .ok_or(RouterError::NodeNotFound(id))?;

        match self.client.dump(&addr).await {
            Ok(pairs) => Ok(pairs),
            Err(err) => {
                tracing::warn!("Dump of node {} failed: {}", id, err);
                Err(RouterError::NoFreshReplica)
            }
        }
    }
}
