//! Handler contract of the embedded framework.

use std::future::Future;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use futures_util::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

/// Failures raised while the embedded framework processes a request.
#[derive(Debug, Error)]
pub enum FrameworkError {
    /// A handler reported a failure.
    #[error("handler failed: {0}")]
    Handler(String),

    /// A handler produced a response that could not be built.
    #[error("invalid response: {0}")]
    Response(#[from] axum::http::Error),
}

impl FrameworkError {
    pub fn handler(msg: impl Into<String>) -> Self {
        FrameworkError::Handler(msg.into())
    }
}

pub type HandlerResult = Result<Response<Body>, FrameworkError>;

/// Opaque identifier for a declared handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum HandlerRef {
    /// A direct function handler, named by its type.
    Function(String),
    /// Declared handler is not a direct function (static response etc).
    Placeholder,
}

/// A request handler registered with the embedded framework.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, HandlerResult>;

    /// Identifier advertised in the route list.
    fn handler_ref(&self) -> HandlerRef;
}

/// Adapts an async function into a [`Handler`].
pub struct FnHandler<F> {
    f: F,
    name: &'static str,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            name: std::any::type_name::<F>(),
        }
    }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self.f)(request))
    }

    fn handler_ref(&self) -> HandlerRef {
        HandlerRef::Function(self.name.to_string())
    }
}

/// Fixed response served for every request, e.g. routes declared in config.
#[derive(Debug, Clone)]
pub struct StaticResponse {
    status: StatusCode,
    content_type: String,
    body: String,
}

impl StaticResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8".to_string(),
            body: body.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl Handler for StaticResponse {
    fn call(&self, _request: Request<Body>) -> BoxFuture<'static, HandlerResult> {
        let response = Response::builder()
            .status(self.status)
            .header(header::CONTENT_TYPE, self.content_type.as_str())
            .body(Body::from(self.body.clone()))
            .map_err(FrameworkError::from);
        Box::pin(async move { response })
    }

    fn handler_ref(&self) -> HandlerRef {
        HandlerRef::Placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn ok_handler(_req: Request<Body>) -> HandlerResult {
        Ok(Response::new(Body::from("ok")))
    }

    #[test]
    fn test_fn_handler_ref_names_function() {
        let handler = FnHandler::new(ok_handler);
        match handler.handler_ref() {
            HandlerRef::Function(name) => assert!(name.ends_with("ok_handler")),
            other => panic!("unexpected ref {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_static_response() {
        let handler = StaticResponse::new(StatusCode::CREATED, "made")
            .with_content_type("application/json");
        assert_eq!(handler.handler_ref(), HandlerRef::Placeholder);

        let res = handler.call(Request::new(Body::empty())).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"made");
    }

    #[test]
    fn test_handler_ref_serialization() {
        let json = serde_json::to_value(HandlerRef::Function("app::index".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "function", "name": "app::index"}));
        let json = serde_json::to_value(HandlerRef::Placeholder).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "placeholder"}));
    }
}
