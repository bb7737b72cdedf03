//! Bridge between the embedded framework's routes and the host dispatcher.
//!
//! # Responsibilities
//! - Rebuild the route table from the framework's live route list
//! - Resolve (path, method) for the host
//! - Register validated routes into the framework
//!
//! # Design Decisions
//! - The table is rebuilt on every call and dropped afterwards; no cache
//!   to invalidate, no lock around it
//! - "ALL" is expanded here, one declaration per routable method
//! - No match falls back to the requested path; the host decides what that means

use std::sync::Arc;

use axum::http::Method;

use crate::bridge::dispatch::DispatchEntryPoint;
use crate::bridge::registration::{RegistrationError, RouteSpec};
use crate::framework::EmbeddedFramework;
use crate::observability::metrics;
use crate::routing::method::{normalize, RoutableMethod};
use crate::routing::pattern::CompiledRoute;
use crate::routing::table::{RouteDeclaration, RouteTable};

/// Result of resolving a request against the declared routes.
#[derive(Debug, Clone)]
pub struct Lookup {
    /// The bridge's constant dispatch entry point.
    pub entry: DispatchEntryPoint,
    /// Request method with HEAD mapped to GET.
    pub method: Method,
    /// Declared path of the matched route, or the requested path.
    pub path: String,
    pub matched: bool,
}

/// Adapter exposing an embedded framework to the host dispatcher.
pub struct BridgeAdapter {
    framework: Arc<dyn EmbeddedFramework>,
    entry: DispatchEntryPoint,
}

impl BridgeAdapter {
    pub fn new(framework: Arc<dyn EmbeddedFramework>) -> Self {
        let entry = DispatchEntryPoint::new(framework.clone());
        Self { framework, entry }
    }

    /// Build a fresh route table from the framework's current routes.
    pub fn refresh(&self) -> RouteTable {
        let routes = self.framework.routes();
        let mut table = RouteTable::new();

        for method in RoutableMethod::ALL {
            for route in routes.iter().filter(|r| r.method.covers(method)) {
                let declaration =
                    RouteDeclaration::new(route.path.clone(), method, route.handler.clone());
                if let Err(e) = table.add(declaration) {
                    tracing::warn!(method = %method, path = %route.path, error = %e, "Skipping route");
                }
            }
        }

        table
    }

    /// The statically advertised route table.
    pub fn get_routes(&self) -> Vec<RouteDeclaration> {
        self.refresh().declarations()
    }

    /// Resolve a request to the declared route serving it.
    pub fn lookup(&self, path: &str, method: &Method) -> Lookup {
        let table = self.refresh();
        let method = normalize(method);

        let declared = RoutableMethod::from_http(&method)
            .and_then(|m| table.find(m, path))
            .map(|d| d.path.clone());

        let matched = declared.is_some();
        metrics::record_lookup(matched);
        tracing::trace!(method = %method, path = %path, resolved = ?declared, "Lookup");

        Lookup {
            entry: self.entry.clone(),
            method,
            path: declared.unwrap_or_else(|| path.to_string()),
            matched,
        }
    }

    /// Validate `spec` and register it with the embedded framework.
    pub fn route(&self, spec: RouteSpec) -> Result<(), RegistrationError> {
        spec.target.validate()?;

        let pattern = spec.target.pattern();
        CompiledRoute::compile(&pattern)?;

        if let Some(existing) = self.refresh().find(spec.method, spec.target.probe()) {
            tracing::debug!(existing = %existing.path, "Route collision");
            return Err(if existing.path == pattern {
                RegistrationError::Duplicate {
                    method: spec.method,
                    path: pattern,
                }
            } else {
                RegistrationError::Conflict {
                    method: spec.method,
                    path: pattern,
                    existing: existing.path.clone(),
                }
            });
        }

        self.framework
            .register(spec.method.into(), &pattern, spec.handler);
        tracing::info!(method = %spec.method, target = %spec.target, "Route registered");
        Ok(())
    }

    pub fn entry_point(&self) -> &DispatchEntryPoint {
        &self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{HandlerResult, MicroApp, StaticResponse};
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};

    async fn ok(_req: Request<Body>) -> HandlerResult {
        Ok(Response::new(Body::from("ok")))
    }

    fn bridge() -> (Arc<MicroApp>, BridgeAdapter) {
        let app = Arc::new(MicroApp::new());
        let adapter = BridgeAdapter::new(app.clone());
        (app, adapter)
    }

    fn prefix(method: &str, prefix: &str) -> RouteSpec {
        RouteSpec::builder()
            .method(method)
            .path_prefix(prefix)
            .handler(StaticResponse::new(StatusCode::OK, "prefix"))
            .build()
            .unwrap()
    }

    fn spec(method: &str, path: &str) -> RouteSpec {
        RouteSpec::builder()
            .method(method)
            .path(path)
            .handler(StaticResponse::new(StatusCode::OK, "spec"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_refresh_expands_all_in_method_order() {
        let (app, adapter) = bridge();
        app.post("/p", ok).all("/any", ok).get("/g", ok);

        let routes: Vec<_> = adapter
            .get_routes()
            .into_iter()
            .map(|d| (d.method, d.path))
            .collect();

        let mut expected = vec![
            (RoutableMethod::Get, "/any".to_string()),
            (RoutableMethod::Get, "/g".to_string()),
            (RoutableMethod::Post, "/p".to_string()),
            (RoutableMethod::Post, "/any".to_string()),
        ];
        for m in &RoutableMethod::ALL[2..] {
            expected.push((*m, "/any".to_string()));
        }
        assert_eq!(routes, expected);
    }

    #[test]
    fn test_refresh_sees_late_registrations() {
        let (app, adapter) = bridge();
        assert!(adapter.refresh().is_empty());
        app.get("/late", ok);
        assert_eq!(adapter.lookup("/late", &Method::GET).path, "/late");
        assert!(adapter.lookup("/late", &Method::GET).matched);
    }

    #[test]
    fn test_refresh_skips_uncompilable_routes() {
        let (app, adapter) = bridge();
        app.get("/bad(", ok).get("/good", ok);
        let paths: Vec<_> = adapter.get_routes().into_iter().map(|d| d.path).collect();
        assert_eq!(paths, vec!["/good"]);
    }

    #[test]
    fn test_lookup_normalizes_head() {
        let (app, adapter) = bridge();
        app.get("/users/:id", ok);

        let lookup = adapter.lookup("/users/5", &Method::HEAD);
        assert_eq!(lookup.method, Method::GET);
        assert_eq!(lookup.path, "/users/:id");
        assert!(lookup.matched);
    }

    #[test]
    fn test_lookup_unroutable_method_falls_back() {
        let (app, adapter) = bridge();
        app.all("/x", ok);

        let lookup = adapter.lookup("/x", &Method::TRACE);
        assert_eq!(lookup.method, Method::TRACE);
        assert_eq!(lookup.path, "/x");
        assert!(!lookup.matched);
    }

    #[test]
    fn test_lookup_returns_constant_entry_point() {
        let (app, adapter) = bridge();
        app.get("/a", ok);
        let first = adapter.lookup("/a", &Method::GET);
        let second = adapter.lookup("/nope", &Method::POST);
        assert!(first.entry.same_as(&second.entry));
        assert!(first.entry.same_as(adapter.entry_point()));
    }

    #[test]
    fn test_adapters_over_one_framework_have_own_entry_points() {
        let app = Arc::new(MicroApp::new());
        let a = BridgeAdapter::new(app.clone());
        let b = BridgeAdapter::new(app);
        assert!(!a.entry_point().same_as(b.entry_point()));
        assert!(a.lookup("/", &Method::GET).entry.same_as(a.entry_point()));
    }

    #[test]
    fn test_route_rejects_duplicates() {
        let (app, adapter) = bridge();
        adapter.route(spec("POST", "/a")).unwrap();

        let err = adapter.route(spec("POST", "/a")).unwrap_err();
        assert!(matches!(err, RegistrationError::Duplicate { .. }));
        assert_eq!(err.to_string(), "route POST /a is already registered");
        assert_eq!(app.routes().len(), 1);

        // Same path, different method is fine
        adapter.route(spec("GET", "/a")).unwrap();
        assert_eq!(app.routes().len(), 2);
    }

    #[test]
    fn test_route_collides_with_pattern_routes() {
        let (app, adapter) = bridge();
        app.get("/users/:id", ok);
        let err = adapter.route(spec("GET", "/users/7")).unwrap_err();
        assert!(matches!(err, RegistrationError::Conflict { .. }));
        assert_eq!(
            err.to_string(),
            "route GET /users/7 conflicts with existing route GET /users/:id"
        );
    }

    #[test]
    fn test_route_reports_covering_prefix() {
        let (app, adapter) = bridge();
        adapter.route(prefix("GET", "/docs/")).unwrap();

        let err = adapter.route(spec("GET", "/docs/changelog")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "route GET /docs/changelog conflicts with existing route GET /docs/*"
        );

        let err = adapter.route(prefix("GET", "/docs/api/")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "route GET /docs/api/* conflicts with existing route GET /docs/*"
        );

        let err = adapter.route(prefix("GET", "/docs/")).unwrap_err();
        assert!(matches!(err, RegistrationError::Duplicate { .. }));
        assert_eq!(err.to_string(), "route GET /docs/* is already registered");
        assert_eq!(app.routes().len(), 1);
    }

    #[test]
    fn test_route_validates_shape() {
        let (app, adapter) = bridge();
        assert!(matches!(
            adapter.route(spec("GET", "relative")),
            Err(RegistrationError::InvalidPath(_))
        ));

        assert!(matches!(
            adapter.route(prefix("GET", "/assets")),
            Err(RegistrationError::InvalidPrefix(_))
        ));

        assert!(matches!(
            adapter.route(spec("GET", "/oops[")),
            Err(RegistrationError::InvalidPattern(_))
        ));
        assert!(app.routes().is_empty());
    }

    #[test]
    fn test_route_prefix_registers_wildcard() {
        let (app, adapter) = bridge();
        adapter.route(prefix("GET", "/assets/")).unwrap();

        assert_eq!(app.routes()[0].path, "/assets/*");
        assert_eq!(adapter.lookup("/assets/js/app.js", &Method::GET).path, "/assets/*");
    }
}
