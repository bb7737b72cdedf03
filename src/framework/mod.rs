//! Embedded framework seam.
//!
//! # Data Flow
//! ```text
//! Application code
//!     → app.rs (fluent registration: get/post/.../all)
//!     → live route list (method | ALL, path, handler)
//!
//! Bridge refresh:
//!     EmbeddedFramework::routes() → snapshot of the live list
//!
//! Dispatch entry point:
//!     context.rs (install HostContext for the request)
//!     → EmbeddedFramework::handle(raw request)
//!     → framework's own routing → handler.rs (Handler::call)
//! ```
//!
//! # Design Decisions
//! - The bridge only sees this trait; any framework with a route list
//!   and a raw-request entry point can be wrapped
//! - The framework's routing decides the handler at dispatch time,
//!   independently of the bridge's lookup

pub mod app;
pub mod context;
pub mod handler;

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use futures_util::future::BoxFuture;

use crate::routing::method::DeclaredMethod;

pub use app::{MicroApp, PathParams};
pub use handler::{FnHandler, FrameworkError, Handler, HandlerRef, HandlerResult, StaticResponse};

/// One entry of the embedded framework's live route list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkRoute {
    pub method: DeclaredMethod,
    pub path: String,
    pub handler: HandlerRef,
}

/// What the bridge needs from an embedded web framework.
pub trait EmbeddedFramework: Send + Sync + 'static {
    /// Snapshot of the currently registered routes, in registration order.
    fn routes(&self) -> Vec<FrameworkRoute>;

    /// Add a route to the live list.
    fn register(&self, method: DeclaredMethod, path: &str, handler: Arc<dyn Handler>);

    /// Handle a raw request through the framework's full pipeline.
    fn handle(&self, request: Request<Body>) -> BoxFuture<'_, HandlerResult>;
}
