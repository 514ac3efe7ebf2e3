//! Axum glue for the router's client-facing surface.
//!
//! Handlers translate core results into the wire contract: plain-string
//! replies with distinguished `ERR_*` values, plus an HTTP status that
//! mirrors the outcome class.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json,
};

use super::coordinator::Router;
use super::protocol::{
    PutRequest, ServerRequest, ENDPOINT_ADD_SERVER, ENDPOINT_GET, ENDPOINT_KV_PAIRS,
    ENDPOINT_LIST_SERVERS, ENDPOINT_PUT, ENDPOINT_SHUTDOWN_SERVER,
};
use crate::error::RouterError;

fn error_status(err: &RouterError) -> StatusCode {
    match err {
        RouterError::NoServers | RouterError::NoFreshReplica => StatusCode::SERVICE_UNAVAILABLE,
        RouterError::KeyNotFound | RouterError::NodeNotFound(_) => StatusCode::NOT_FOUND,
        RouterError::AlreadyExists(_) => StatusCode::CONFLICT,
    }
}

pub async fn handle_put(
    Extension(router): Extension<Arc<Router>>,
    Json(req): Json<PutRequest>,
) -> (StatusCode, String) {
    match router.put(&req.key, &req.value).await {
        Ok(outcome) => {
            let mut reply = format!("Success put {}:{}", req.key, req.value);
            if !outcome.stale.is_empty() {
                let ids: Vec<String> = outcome.stale.iter().map(|id| id.to_string()).collect();
                reply.push_str(&format!(" [stale: {}]", ids.join(", ")));
            }
            (StatusCode::OK, reply)
        }
        Err(err) => (error_status(&err), err.wire_reply()),
    }
}

pub async fn handle_get(
    Extension(router): Extension<Arc<Router>>,
    Path(key): Path<String>,
) -> (StatusCode, String) {
    match router.get(&key).await {
        Ok(value) => (StatusCode::OK, value),
        Err(err) => (error_status(&err), err.wire_reply()),
    }
}

pub async fn handle_add_server(
    Extension(router): Extension<Arc<Router>>,
    Json(req): Json<ServerRequest>,
) -> (StatusCode, String) {
    let addr = router.config().node_address(req.id);
    match router.add_server(req.id, addr).await {
        Ok(outcome) if outcome.synced => (StatusCode::OK, "Success".to_string()),
        Ok(_) => (StatusCode::OK, "Success [pending sync]".to_string()),
        Err(err) => (error_status(&err), err.wire_reply()),
    }
}

pub async fn handle_shutdown_server(
    Extension(router): Extension<Arc<Router>>,
    Json(req): Json<ServerRequest>,
) -> (StatusCode, String) {
    match router.shutdown_server(req.id).await {
        Ok(()) => (StatusCode::OK, format!("[Shutdown Server {}]", req.id)),
        Err(err) => (error_status(&err), err.wire_reply()),
    }
}

pub async fn handle_list_servers(
    Extension(router): Extension<Arc<Router>>,
) -> (StatusCode, String) {
    let ids = router.list_servers();
    if ids.is_empty() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            RouterError::NoServers.wire_reply(),
        );
    }
    let ids: Vec<String> = ids.into_iter().map(|id| id.to_string()).collect();
    (StatusCode::OK, ids.join(", "))
}

pub async fn handle_kv_pairs(
    Extension(router): Extension<Arc<Router>>,
    Path(id): Path<u32>,
) -> (StatusCode, String) {
    match router.kv_pairs(id).await {
        Ok(pairs) => (StatusCode::OK, pairs),
        Err(err) => (error_status(&err), err.wire_reply()),
    }
}

/// The router's HTTP application.
pub fn app(router: Arc<Router>) -> axum::Router {
    axum::Router::new()
        .route(ENDPOINT_PUT, post(handle_put))
        .route(&format!("{}/:key", ENDPOINT_GET), get(handle_get))
        .route(ENDPOINT_ADD_SERVER, post(handle_add_server))
        .route(ENDPOINT_SHUTDOWN_SERVER, post(handle_shutdown_server))
        .route(ENDPOINT_LIST_SERVERS, get(handle_list_servers))
        .route(&format!("{}/:id", ENDPOINT_KV_PAIRS), get(handle_kv_pairs))
        .layer(Extension(router))
}
