//! Router-level error taxonomy.
//!
//! Replica-level failures never show up here: an unreachable replica is
//! absorbed into a membership transition (stale-marking, failure counting)
//! and at most annotates an otherwise-successful reply. What remains are the
//! router-level outcomes that the RPC surface normalizes into data.

use thiserror::Error;

/// Errors returned by the coordination tier to its callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    /// The registry holds no nodes at all.
    #[error("no storage nodes registered")]
    NoServers,

    /// The key has never been written.
    #[error("key not found in the authoritative log")]
    KeyNotFound,

    /// The operation targets a node id that is not registered.
    #[error("node {0} is not registered")]
    NodeNotFound(u32),

    /// Every read candidate was exhausted without producing a value at least
    /// as fresh as the authoritative version.
    #[error("no replica served a fresh value")]
    NoFreshReplica,

    /// `add_server` for an id that is already registered and live.
    #[error("node {0} is already registered and live")]
    AlreadyExists(u32),
}

impl RouterError {
    /// The distinguished status string for the client-facing RPC surface.
    pub fn wire_reply(&self) -> String {
        match self {
            RouterError::NoServers => "ERR_NOSERVERS".to_string(),
            RouterError::KeyNotFound => "ERR_KEY".to_string(),
            RouterError::NodeNotFound(_) => "ERR_NOEXIST".to_string(),
            // Callers cannot distinguish "no nodes" from "no fresh node";
            // both mean the read could not be served right now.
            RouterError::NoFreshReplica => "ERR_NOSERVERS".to_string(),
            RouterError::AlreadyExists(_) => "ERR_EXISTS".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_replies() {
        assert_eq!(RouterError::NoServers.wire_reply(), "ERR_NOSERVERS");
        assert_eq!(RouterError::KeyNotFound.wire_reply(), "ERR_KEY");
        assert_eq!(RouterError::NodeNotFound(4).wire_reply(), "ERR_NOEXIST");
        assert_eq!(RouterError::NoFreshReplica.wire_reply(), "ERR_NOSERVERS");
        assert_eq!(RouterError::AlreadyExists(1).wire_reply(), "ERR_EXISTS");
    }
}
