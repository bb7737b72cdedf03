//! Demo application served by the `action-bridge` binary.

use axum::body::Body;
use axum::http::{header, Request, Response};
use serde_json::json;

use crate::framework::{context, FrameworkError, HandlerResult, MicroApp, PathParams};

/// Build the demo routes.
pub fn build_app() -> MicroApp {
    let app = MicroApp::new();
    app.get("/", index)
        .get("/users/:id", show_user)
        .post("/users", create_user)
        .all("/context", show_context)
        .get("/fail", fail);
    app
}

fn json_response(value: serde_json::Value) -> HandlerResult {
    Ok(Response::builder()
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))?)
}

fn param(req: &Request<Body>, name: &str) -> String {
    req.extensions()
        .get::<PathParams>()
        .and_then(|p| p.get(name))
        .unwrap_or_default()
        .to_string()
}

async fn index(_req: Request<Body>) -> HandlerResult {
    Ok(Response::new(Body::from("action-bridge demo")))
}

async fn show_user(req: Request<Body>) -> HandlerResult {
    json_response(json!({ "id": param(&req, "id") }))
}

async fn create_user(req: Request<Body>) -> HandlerResult {
    let body = axum::body::to_bytes(req.into_body(), 64 * 1024)
        .await
        .map_err(|e| FrameworkError::handler(e.to_string()))?;
    Ok(Response::builder()
        .status(201)
        .body(Body::from(body))?)
}

async fn show_context(_req: Request<Body>) -> HandlerResult {
    let ctx = context::current()
        .ok_or_else(|| FrameworkError::handler("no host context"))?;
    json_response(json!({
        "request_id": ctx.request_id,
        "method": ctx.method.as_str(),
        "resolved_path": ctx.resolved_path,
        "remote_addr": ctx.remote_addr.map(|a| a.to_string()),
    }))
}

async fn fail(_req: Request<Body>) -> HandlerResult {
    Err(FrameworkError::handler("demo failure"))
}
