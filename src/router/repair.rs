//! Anti-entropy repair.
//!
//! A stale node is brought back by pushing the entire authoritative log —
//! every key with its value and version, plus the global counter — in one
//! snapshot call. Full-state resync is acceptable here: the log lives
//! entirely in memory and transfer cost is bounded by key count, not by how
//! long the node was away.

use crate::router::coordinator::Router;

/// Try to resync one stale node. Promotes it to live on success; on failure
/// it stays stale and the next heartbeat cycle tries again.
pub async fn resync(router: &Router, id: u32, addr: &str) -> bool {
    let snapshot = router.log().snapshot();
    let entry_count = snapshot.entries.len();

    match router.client().load_snapshot(addr, &snapshot).await {
        Ok(()) => {
            router.registry().mark_live(id);
            tracing::info!(
                "Repaired node {}: {} entries pushed (counter at {})",
                id,
                entry_count,
                snapshot.version
            );
            true
        }
        Err(err) => {
            tracing::debug!("Repair of node {} failed, leaving it stale: {}", id, err);
            false
        }
    }
}
