//! The membership registry.
//!
//! One owned object with locked accessor methods; concurrency safety is a
//! property of the type, not of caller discipline. Internally a `DashMap`
//! keyed by node id — mutations hold only the entry's shard lock, and no
//! lock is ever held across an RPC call.

use dashmap::DashMap;

use super::types::{Member, NodeState};
use crate::error::RouterError;

pub struct MembershipRegistry {
    members: DashMap<u32, Member>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self {
            members: DashMap::new(),
        }
    }

    /// Register a node and mark it live.
    ///
    /// Re-adding an id that is present and live is an error; re-adding an id
    /// that is present but stale replaces the record — the operator is
    /// telling us the process was restarted.
    pub fn add(&self, id: u32, addr: String) -> Result<(), RouterError> {
        if let Some(existing) = self.members.get(&id) {
            if existing.is_live() {
                return Err(RouterError::AlreadyExists(id));
            }
        }
        self.members.insert(id, Member::new(id, addr));
        tracing::info!("Node {} registered as live", id);
        Ok(())
    }

    /// Delete a node from the registry. Returns the removed member, if any.
    pub fn remove(&self, id: u32) -> Option<Member> {
        let removed = self.members.remove(&id).map(|(_, member)| member);
        if removed.is_some() {
            tracing::info!("Node {} removed from the registry", id);
        }
        removed
    }

    /// Sorted ids of every known node, independent of state.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.members.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn addr_of(&self, id: u32) -> Option<String> {
        self.members.get(&id).map(|entry| entry.addr.clone())
    }

    pub fn contains(&self, id: u32) -> bool {
        self.members.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Point-in-time snapshot of the live set. Fan-outs iterate this
    /// snapshot, not the registry itself, so membership changes mid-fan-out
    /// cannot extend the critical section.
    pub fn live_members(&self) -> Vec<Member> {
        self.members
            .iter()
            .filter(|entry| entry.value().is_live())
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Point-in-time snapshot of every member, any state.
    pub fn members(&self) -> Vec<Member> {
        self.members
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Exclude a node from write fan-out until it is repaired.
    pub fn mark_stale(&self, id: u32) -> bool {
        match self.members.get_mut(&id) {
            Some(mut member) => {
                if member.state != NodeState::Stale {
                    tracing::warn!("Node {} marked stale", id);
                    member.state = NodeState::Stale;
                }
                true
            }
            None => false,
        }
    }

    /// Promote a node back to live after a successful resync.
    pub fn mark_live(&self, id: u32) -> bool {
        match self.members.get_mut(&id) {
            Some(mut member) => {
                if member.state != NodeState::Live {
                    tracing::info!("Node {} promoted to live", id);
                    member.state = NodeState::Live;
                }
                member.missed_heartbeats = 0;
                true
            }
            None => false,
        }
    }

    /// Record a successful heartbeat: reset the miss counter and report the
    /// state the node was in, so the caller can hand stale nodes to repair.
    pub fn heartbeat_ok(&self, id: u32) -> Option<NodeState> {
        self.members.get_mut(&id).map(|mut member| {
            member.missed_heartbeats = 0;
            member.state
        })
    }

    /// Record a missed heartbeat and return the new consecutive-miss count.
    pub fn heartbeat_missed(&self, id: u32) -> Option<u32> {
        self.members.get_mut(&id).map(|mut member| {
            member.missed_heartbeats += 1;
            member.missed_heartbeats
        })
    }
}

impl Default for MembershipRegistry {
    fn default() -> Self {
        Self::new()
    }
}
