//! The single host-facing dispatch entry point.
//!
//! # Responsibilities
//! - Install the host context for the duration of the request
//! - Replay the raw request through the embedded framework's own routing
//! - Convert every failure (error or panic) into a fixed 500 response
//!
//! # Design Decisions
//! - One value per bridge, created at construction; clones share it
//! - This is the bridge's only error boundary; nothing is retried
//! - Failure details go to the log, never to the client

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Response, StatusCode};
use futures_util::FutureExt;

use crate::framework::{context, EmbeddedFramework};
use crate::host::HostContext;
use crate::observability::metrics;

/// Fixed body of the failure response.
pub const FAILURE_BODY: &str = "Internal Server Error";

/// Host-facing function that hands a request to the embedded framework.
#[derive(Clone)]
pub struct DispatchEntryPoint {
    inner: Arc<Inner>,
}

struct Inner {
    framework: Arc<dyn EmbeddedFramework>,
}

impl DispatchEntryPoint {
    pub(crate) fn new(framework: Arc<dyn EmbeddedFramework>) -> Self {
        Self {
            inner: Arc::new(Inner { framework }),
        }
    }

    /// Dispatch `request` through the embedded framework under `ctx`.
    pub async fn call(&self, ctx: HostContext, request: Request<Body>) -> Response<Body> {
        let start = Instant::now();
        let request_id = ctx.request_id.clone();
        let method = ctx.method.to_string();

        let outcome = AssertUnwindSafe(context::scope(ctx, self.inner.framework.handle(request)))
            .catch_unwind()
            .await;

        let failure = match outcome {
            Ok(Ok(response)) => {
                metrics::record_dispatch(&method, response.status().as_u16(), start);
                return response;
            }
            Ok(Err(e)) => e.to_string(),
            Err(panic) => format!("handler panicked: {}", panic_message(&*panic)),
        };

        tracing::error!(request_id = %request_id, error = %failure, "Dispatch failed");
        metrics::record_dispatch_failure();
        metrics::record_dispatch(&method, StatusCode::INTERNAL_SERVER_ERROR.as_u16(), start);
        failure_response()
    }

    /// True when both values are clones of one entry point.
    pub fn same_as(&self, other: &DispatchEntryPoint) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for DispatchEntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEntryPoint").finish_non_exhaustive()
    }
}

/// The response every dispatch failure is converted to.
pub fn failure_response() -> Response<Body> {
    let mut response = Response::new(Body::from(FAILURE_BODY));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
