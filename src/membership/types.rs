use serde::{Deserialize, Serialize};

/// Reachability state of a registered storage node.
///
/// There is no `Removed` variant: a removed node is deleted from the
/// registry outright, so it can receive no further traffic until re-added.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeState {
    /// In sync with the authoritative log; eligible for reads and writes.
    Live,
    /// Known (or suspected) to be behind. Still heartbeated, but excluded
    /// from write fan-out until a snapshot resync succeeds.
    Stale,
}

/// A single registered storage node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Operator-assigned small integer identity.
    pub id: u32,
    /// HTTP address of the node, `host:port`.
    pub addr: String,
    pub state: NodeState,
    /// Consecutive missed heartbeats. Reset to zero on every successful
    /// probe.
    pub missed_heartbeats: u32,
}

impl Member {
    pub fn new(id: u32, addr: String) -> Self {
        Self {
            id,
            addr,
            state: NodeState::Live,
            missed_heartbeats: 0,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state == NodeState::Live
    }
}
