//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use action_bridge::bridge::BridgeAdapter;
use action_bridge::config::BridgeConfig;
use action_bridge::framework::MicroApp;
use action_bridge::host::HostServer;
use action_bridge::lifecycle::Shutdown;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// A micro-framework wired to a bridge, sharing the live route list.
#[allow(dead_code)]
pub fn bridged(app: MicroApp) -> (Arc<MicroApp>, Arc<BridgeAdapter>) {
    let app = Arc::new(app);
    let bridge = Arc::new(BridgeAdapter::new(app.clone()));
    (app, bridge)
}

/// Send one request through the host router in-process.
#[allow(dead_code)]
pub async fn send(server: &HostServer, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = server.router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Start a host server on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(config: BridgeConfig, bridge: Arc<BridgeAdapter>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HostServer::new(config, bridge);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}
