//! Runtime configuration for the router and the storage nodes.
//!
//! Everything tunable about failure detection and read routing lives here:
//! how often nodes are probed, how many consecutive misses remove a node,
//! how many transport retries a read spends per candidate, and how node ids
//! map to network addresses.

use std::time::Duration;

/// Default number of heartbeat probes per second.
pub const DEFAULT_HEARTBEAT_RATE: u32 = 10;
/// Default number of consecutive missed heartbeats before a node is removed.
pub const DEFAULT_MAX_MISSED_HEARTBEATS: u32 = 3;
/// Default number of transport attempts per read candidate.
pub const DEFAULT_READ_RETRIES: u32 = 3;
/// Default bound on every replica RPC.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_millis(500);
/// Default host storage nodes listen on.
pub const DEFAULT_BASE_HOST: &str = "127.0.0.1";
/// Default base port; node `id` listens on `base_port + id`.
pub const DEFAULT_BASE_PORT: u16 = 9000;

/// Tuning knobs for the coordination tier.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Heartbeat probes per second across the whole membership.
    pub heartbeat_rate: u32,
    /// Consecutive missed heartbeats after which a node is dropped from the
    /// registry.
    pub max_missed_heartbeats: u32,
    /// Transport attempts per candidate during a read.
    pub read_retries: u32,
    /// Upper bound on every RPC to a storage node. A timed-out call is
    /// treated identically to a failed call.
    pub rpc_timeout: Duration,
    /// Host part of derived node addresses.
    pub base_host: String,
    /// Node `id` is addressed at `base_host:(base_port + id)`.
    pub base_port: u16,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            heartbeat_rate: DEFAULT_HEARTBEAT_RATE,
            max_missed_heartbeats: DEFAULT_MAX_MISSED_HEARTBEATS,
            read_retries: DEFAULT_READ_RETRIES,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            base_host: DEFAULT_BASE_HOST.to_string(),
            base_port: DEFAULT_BASE_PORT,
        }
    }
}

impl RouterConfig {
    /// Interval between failure-detector ticks.
    pub fn heartbeat_interval(&self) -> Duration {
        let rate = self.heartbeat_rate.max(1);
        Duration::from_secs_f64(1.0 / rate as f64)
    }

    /// Deterministic address for a node id.
    pub fn node_address(&self, id: u32) -> String {
        format!("{}:{}", self.base_host, self.base_port + id as u16)
    }
}

/// Settings for a single storage node process.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Operator-assigned small integer identity.
    pub id: u32,
    /// Host to bind on.
    pub host: String,
    /// Base port; the node binds `base_port + id`.
    pub base_port: u16,
}

impl NodeConfig {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            host: DEFAULT_BASE_HOST.to_string(),
            base_port: DEFAULT_BASE_PORT,
        }
    }

    /// The address this node listens on.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.base_port + self.id as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_address_is_base_plus_id() {
        let cfg = RouterConfig::default();
        assert_eq!(cfg.node_address(0), "127.0.0.1:9000");
        assert_eq!(cfg.node_address(7), "127.0.0.1:9007");
    }

    #[test]
    fn test_heartbeat_interval_from_rate() {
        let mut cfg = RouterConfig::default();
        cfg.heartbeat_rate = 10;
        assert_eq!(cfg.heartbeat_interval(), Duration::from_millis(100));

        // A zero rate must not panic; it clamps to one probe per second.
        cfg.heartbeat_rate = 0;
        assert_eq!(cfg.heartbeat_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_node_config_listen_address() {
        let cfg = NodeConfig::new(3);
        assert_eq!(cfg.listen_address(), "127.0.0.1:9003");
    }
}
