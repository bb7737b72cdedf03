//! Reference embedded micro-framework.
//!
//! # Responsibilities
//! - Fluent route registration (`app.get("/users/:id", show_user)`)
//! - Keep the live route list the bridge polls
//! - Route raw requests to handlers with its own segment matcher
//!
//! # Design Decisions
//! - Routes can be added at any time through `&self`; the list sits behind a `RwLock`
//! - First registered match wins; no specificity ranking
//! - HEAD requests are served by GET routes
//! - `*` as the last character of a segment swallows the rest of the path

use std::future::Future;
use std::sync::{Arc, RwLock};

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use futures_util::future::BoxFuture;

use crate::framework::handler::{FnHandler, Handler, HandlerResult};
use crate::framework::{EmbeddedFramework, FrameworkRoute};
use crate::routing::method::{normalize, DeclaredMethod, RoutableMethod};

/// Path parameters captured by the framework's router, stored in request extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Suffix swallowed by a trailing `*`.
    pub fn rest(&self) -> Option<&str> {
        self.get("*")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Rest(String),
}

struct AppRoute {
    method: DeclaredMethod,
    path: String,
    segments: Vec<Segment>,
    handler: Arc<dyn Handler>,
}

/// A small Express-style web framework.
#[derive(Default)]
pub struct MicroApp {
    routes: RwLock<Vec<AppRoute>>,
}

impl MicroApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F, Fut>(&self, method: DeclaredMethod, path: &str, f: F) -> &Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.mount(method, path, Arc::new(FnHandler::new(f)));
        self
    }

    pub fn get<F, Fut>(&self, path: &str, f: F) -> &Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(RoutableMethod::Get.into(), path, f)
    }

    pub fn post<F, Fut>(&self, path: &str, f: F) -> &Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(RoutableMethod::Post.into(), path, f)
    }

    pub fn put<F, Fut>(&self, path: &str, f: F) -> &Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(RoutableMethod::Put.into(), path, f)
    }

    pub fn patch<F, Fut>(&self, path: &str, f: F) -> &Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(RoutableMethod::Patch.into(), path, f)
    }

    pub fn delete<F, Fut>(&self, path: &str, f: F) -> &Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(RoutableMethod::Delete.into(), path, f)
    }

    pub fn options<F, Fut>(&self, path: &str, f: F) -> &Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(RoutableMethod::Options.into(), path, f)
    }

    /// Register a handler for every routable method.
    pub fn all<F, Fut>(&self, path: &str, f: F) -> &Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(DeclaredMethod::All, path, f)
    }

    /// Register any [`Handler`] implementation, e.g. a static response.
    pub fn serve(&self, method: DeclaredMethod, path: &str, handler: impl Handler) -> &Self {
        self.mount(method, path, Arc::new(handler));
        self
    }

    fn mount(&self, method: DeclaredMethod, path: &str, handler: Arc<dyn Handler>) {
        tracing::debug!(method = %method, path = %path, "Route registered");
        let route = AppRoute {
            method,
            path: path.to_string(),
            segments: parse_segments(path),
            handler,
        };
        self.routes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(route);
    }

    fn resolve(&self, method: RoutableMethod, path: &str) -> Option<(Arc<dyn Handler>, PathParams)> {
        let request_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
        routes
            .iter()
            .filter(|r| r.method.covers(method))
            .find_map(|r| {
                match_segments(&r.segments, &request_segments).map(|p| (r.handler.clone(), p))
            })
    }
}

impl EmbeddedFramework for MicroApp {
    fn routes(&self) -> Vec<FrameworkRoute> {
        self.routes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|r| FrameworkRoute {
                method: r.method,
                path: r.path.clone(),
                handler: r.handler.handler_ref(),
            })
            .collect()
    }

    fn register(&self, method: DeclaredMethod, path: &str, handler: Arc<dyn Handler>) {
        self.mount(method, path, handler);
    }

    fn handle(&self, mut request: Request<Body>) -> BoxFuture<'_, HandlerResult> {
        Box::pin(async move {
            let resolved = RoutableMethod::from_http(&normalize(request.method()))
                .and_then(|m| self.resolve(m, request.uri().path()));

            let Some((handler, params)) = resolved else {
                return not_found();
            };

            request.extensions_mut().insert(params);
            handler.call(request).await
        })
    }
}

fn not_found() -> HandlerResult {
    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from("Not Found"))?)
}

fn parse_segments(path: &str) -> Vec<Segment> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if let Some(prefix) = s.strip_suffix('*') {
                Segment::Rest(prefix.to_string())
            } else if let Some(name) = s.strip_prefix(':').filter(|n| !n.is_empty()) {
                Segment::Param(name.to_string())
            } else {
                Segment::Literal(s.to_string())
            }
        })
        .collect()
}

fn match_segments(route: &[Segment], request: &[&str]) -> Option<PathParams> {
    let mut params = Vec::new();

    for (i, segment) in route.iter().enumerate() {
        match segment {
            Segment::Rest(prefix) => {
                let rest = request[i.min(request.len())..].join("/");
                let tail = rest.strip_prefix(prefix.as_str())?;
                params.push(("*".to_string(), tail.to_string()));
                return Some(PathParams(params));
            }
            Segment::Literal(literal) => {
                if request.get(i).copied() != Some(literal.as_str()) {
                    return None;
                }
            }
            Segment::Param(name) => {
                let value = request.get(i)?;
                params.push((name.clone(), value.to_string()));
            }
        }
    }

    (route.len() == request.len()).then_some(PathParams(params))
}
