use replicated_kvs::config::NodeConfig;
use replicated_kvs::node::handlers::{self, ShutdownHandle};
use replicated_kvs::node::store::LocalStore;

use std::sync::Arc;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut id: Option<u32> = None;
    let mut host: Option<String> = None;
    let mut base_port: Option<u16> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--id" | "-i" => {
                id = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--host" => {
                host = Some(args[i + 1].clone());
                i += 2;
            }
            "--base-port" => {
                base_port = Some(args[i + 1].parse()?);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let id = match id {
        Some(id) => id,
        None => {
            eprintln!("Usage: {} --id <n> [--host <host>] [--base-port <port>]", args[0]);
            std::process::exit(1);
        }
    };

    let mut cfg = NodeConfig::new(id);
    if let Some(host) = host {
        cfg.host = host;
    }
    if let Some(base_port) = base_port {
        cfg.base_port = base_port;
    }

    let listen_addr = cfg.listen_address();
    tracing::info!("Starting storage node {} on {}", cfg.id, listen_addr);

    let store = Arc::new(LocalStore::new());
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let app = handlers::app(store, ShutdownHandle::new(shutdown_tx));

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = shutdown_rx.changed() => {}
            }
        })
        .await?;

    tracing::info!("Node {} is shutting down", id);

    Ok(())
}
