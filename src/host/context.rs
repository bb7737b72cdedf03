//! Host-side per-request context handed to the embedded framework.

use std::net::SocketAddr;

use axum::http::Method;

/// Context the host dispatcher attaches to every bridged request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// Correlation ID (`x-request-id`).
    pub request_id: String,

    /// Peer address, when the transport knows it.
    pub remote_addr: Option<SocketAddr>,

    /// Method after HEAD → GET normalization.
    pub method: Method,

    /// Declared route path, or the requested path when nothing matched.
    pub resolved_path: String,

    /// Whether the lookup matched a declared route.
    pub matched: bool,
}

impl HostContext {
    /// Context for a request that has not been matched to a declared route.
    pub fn new(request_id: impl Into<String>, method: Method, resolved_path: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            remote_addr: None,
            method,
            resolved_path: resolved_path.into(),
            matched: false,
        }
    }
}
