//! Axum handlers for the storage-node surface.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json,
};
use tokio::sync::watch;

use super::protocol::{
    GetEntryResponse, NodeAck, PutEntryRequest, SnapshotRequest, ENDPOINT_GET, ENDPOINT_HEARTBEAT,
    ENDPOINT_PAIRS, ENDPOINT_PUT, ENDPOINT_SHUTDOWN, ENDPOINT_SNAPSHOT,
};
use super::store::LocalStore;

/// Handle used by the shutdown endpoint to stop the serving loop.
#[derive(Debug, Clone)]
pub struct ShutdownHandle(watch::Sender<bool>);

impl ShutdownHandle {
    pub fn new(sender: watch::Sender<bool>) -> Self {
        Self(sender)
    }

    pub fn signal(&self) {
        // Receivers may already be gone during teardown.
        let _ = self.0.send(true);
    }
}

pub async fn handle_put(
    Extension(store): Extension<Arc<LocalStore>>,
    Json(req): Json<PutEntryRequest>,
) -> (StatusCode, Json<NodeAck>) {
    let version = store.put(&req.key, &req.value, req.version);
    tracing::debug!("put {} at v{}", req.key, version);
    (StatusCode::OK, Json(NodeAck { ok: true }))
}

pub async fn handle_get(
    Extension(store): Extension<Arc<LocalStore>>,
    Path(key): Path<String>,
) -> Result<Json<GetEntryResponse>, StatusCode> {
    match store.get(&key) {
        Some(entry) => Ok(Json(GetEntryResponse {
            value: entry.value,
            version: entry.version,
        })),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn handle_snapshot(
    Extension(store): Extension<Arc<LocalStore>>,
    Json(req): Json<SnapshotRequest>,
) -> (StatusCode, Json<NodeAck>) {
    let count = req.entries.len();
    store.install(req.entries, req.version);
    tracing::info!("Installed snapshot: {} entries, counter at {}", count, req.version);
    (StatusCode::OK, Json(NodeAck { ok: true }))
}

pub async fn handle_heartbeat() -> StatusCode {
    StatusCode::OK
}

pub async fn handle_pairs(Extension(store): Extension<Arc<LocalStore>>) -> String {
    store.dump()
}

pub async fn handle_shutdown(
    Extension(store): Extension<Arc<LocalStore>>,
    Extension(shutdown): Extension<ShutdownHandle>,
) -> (StatusCode, Json<NodeAck>) {
    tracing::info!("Received a request for a normal shutdown");
    store.clear();
    shutdown.signal();
    (StatusCode::OK, Json(NodeAck { ok: true }))
}

/// The storage node's HTTP application.
pub fn app(store: Arc<LocalStore>, shutdown: ShutdownHandle) -> axum::Router {
    axum::Router::new()
        .route(ENDPOINT_PUT, post(handle_put))
        .route(&format!("{}/:key", ENDPOINT_GET), get(handle_get))
        .route(ENDPOINT_SNAPSHOT, post(handle_snapshot))
        .route(ENDPOINT_HEARTBEAT, get(handle_heartbeat))
        .route(ENDPOINT_PAIRS, get(handle_pairs))
        .route(ENDPOINT_SHUTDOWN, post(handle_shutdown))
        .layer(Extension(store))
        .layer(Extension(shutdown))
}
