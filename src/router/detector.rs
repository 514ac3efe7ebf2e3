//! Failure detection.
//!
//! One long-lived task probes every known node — live and stale alike — on a
//! fixed period. Answering a heartbeat resets a node's miss counter but does
//! not by itself make a stale node live again: promotion happens only after
//! a successful resync, so a read can never land on a responsive-but-behind
//! replica in the window between responsiveness and repair.

use std::sync::Arc;

use tokio::sync::watch;

use crate::membership::types::NodeState;
use crate::router::coordinator::Router;
use crate::router::repair;

pub struct FailureDetector {
    router: Arc<Router>,
}

impl FailureDetector {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    /// Probe every known node once. Public so tests can drive the detector
    /// without waiting on timers.
    pub async fn probe_once(&self) {
        let members = self.router.registry().members();
        let threshold = self.router.config().max_missed_heartbeats;

        for member in members {
            match self.router.client().heartbeat(&member.addr).await {
                Ok(()) => {
                    let previous = self.router.registry().heartbeat_ok(member.id);
                    // A stale node that answers gets a resync attempt; it
                    // becomes live only if the snapshot lands.
                    if previous == Some(NodeState::Stale) {
                        repair::resync(&self.router, member.id, &member.addr).await;
                    }
                }
                Err(err) => {
                    let missed = match self.router.registry().heartbeat_missed(member.id) {
                        Some(count) => count,
                        // Removed concurrently; nothing to account for.
                        None => continue,
                    };
                    tracing::debug!(
                        "Heartbeat to node {} failed ({} consecutive): {}",
                        member.id,
                        missed,
                        err
                    );
                    if missed >= threshold {
                        tracing::warn!(
                            "Node {} missed {} heartbeats, removing it",
                            member.id,
                            missed
                        );
                        self.router.registry().remove(member.id);
                    }
                }
            }
        }
    }

    /// The detector loop. Runs until the shutdown signal changes.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.router.config().heartbeat_interval());
        tracing::info!(
            "Failure detector running every {:?}",
            self.router.config().heartbeat_interval()
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.probe_once().await;
                }
                _ = shutdown.changed() => {
                    tracing::info!("Failure detector stopping");
                    return;
                }
            }
        }
    }
}
