//! action-bridge server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ host (axum) ──▶ bridge lookup ──▶ routing (table + matcher)
//!                         │                 ▲
//!                         │                 └── refresh ◀── framework route list
//!                         ▼
//!                  dispatch entry point ──▶ embedded framework ──▶ handler
//!     ◀──────────────────────────────────────── response (or fixed 500)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use action_bridge::bridge::{BridgeAdapter, RouteSpec};
use action_bridge::config::{load_config, BridgeConfig};
use action_bridge::demo;
use action_bridge::host::HostServer;
use action_bridge::lifecycle::{signals, Shutdown};
use action_bridge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "action-bridge")]
#[command(about = "Serve an embedded micro-framework through the host dispatcher", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("action-bridge v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        configured_routes = config.routes.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let app = Arc::new(demo::build_app());
    let bridge = Arc::new(BridgeAdapter::new(app));

    for route in &config.routes {
        let spec = RouteSpec::try_from(route)?;
        bridge.route(spec)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            signals::shutdown_signal().await;
            shutdown.trigger();
        });
    }

    let server = HostServer::new(config, bridge);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
