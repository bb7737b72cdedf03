//! Host dispatcher: HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with the bridge fallback and admin endpoints
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve every request through the bridge and invoke its entry point
//! - Answer unmatched lookups with the host's own 404

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::bridge::BridgeAdapter;
use crate::config::BridgeConfig;
use crate::host::admin::setup_admin_router;
use crate::host::HostContext;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct HostState {
    pub bridge: Arc<BridgeAdapter>,
}

/// HTTP server serving the embedded framework's routes through the bridge.
pub struct HostServer {
    router: Router,
}

impl HostServer {
    /// Create a new host server. Reads the advertised route table once.
    pub fn new(config: BridgeConfig, bridge: Arc<BridgeAdapter>) -> Self {
        let routes = bridge.get_routes();
        tracing::info!(count = routes.len(), "Route table advertised");
        for route in &routes {
            tracing::debug!(method = %route.method, path = %route.path, handler = ?route.handler, "Route");
        }

        let state = HostState { bridge };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BridgeConfig, state: HostState) -> Router {
        let mut router: Router<HostState> = Router::new();
        if config.admin.enabled {
            router = router.merge(setup_admin_router(&config.admin.prefix));
        }

        router
            .fallback(host_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process serving.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Host server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Host server stopped");
        Ok(())
    }
}

/// Resolve the request through the bridge and dispatch it.
async fn host_handler(State(state): State<HostState>, request: Request<Body>) -> Response {
    let path = request.uri().path().to_string();
    let lookup = state.bridge.lookup(&path, request.method());

    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    if !lookup.matched {
        tracing::warn!(request_id = %request_id, method = %request.method(), path = %path, "No route matched");
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    }

    tracing::debug!(
        request_id = %request_id,
        method = %lookup.method,
        path = %path,
        route = %lookup.path,
        "Dispatching request"
    );

    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let ctx = HostContext {
        remote_addr,
        matched: lookup.matched,
        ..HostContext::new(request_id, lookup.method.clone(), lookup.path.clone())
    };

    lookup.entry.call(ctx, request).await
}
