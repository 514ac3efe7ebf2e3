use replicated_kvs::config::RouterConfig;
use replicated_kvs::router::coordinator::Router;
use replicated_kvs::router::detector::FailureDetector;
use replicated_kvs::router::handlers;

use std::net::SocketAddr;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut listen_addr: SocketAddr = "127.0.0.1:8001".parse()?;
    let mut cfg = RouterConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--listen" => {
                listen_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--base-host" => {
                cfg.base_host = args[i + 1].clone();
                i += 2;
            }
            "--base-port" => {
                cfg.base_port = args[i + 1].parse()?;
                i += 2;
            }
            "--heartbeat-rate" => {
                cfg.heartbeat_rate = args[i + 1].parse()?;
                i += 2;
            }
            "--max-missed" => {
                cfg.max_missed_heartbeats = args[i + 1].parse()?;
                i += 2;
            }
            "--read-retries" => {
                cfg.read_retries = args[i + 1].parse()?;
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: {} [--listen <addr:port>] [--base-host <host>] [--base-port <port>] \
                     [--heartbeat-rate <n>] [--max-missed <n>] [--read-retries <n>]",
                    args[0]
                );
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    tracing::info!("Starting router on {}", listen_addr);
    tracing::info!(
        "Node addressing: {}:{} + id, heartbeat every {:?}, removal after {} misses",
        cfg.base_host,
        cfg.base_port,
        cfg.heartbeat_interval(),
        cfg.max_missed_heartbeats
    );

    // 1. Coordination core:
    let router = Router::new(cfg);

    // 2. Spawn the failure detector:
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let detector = FailureDetector::new(router.clone());
    tokio::spawn(async move {
        detector.run(shutdown_rx).await;
    });

    // 3. HTTP surface:
    let app = handlers::app(router);

    tracing::info!("Router listening on {}", listen_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    Ok(())
}
