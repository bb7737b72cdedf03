//! Admin endpoints: advertised route table and lookup diagnostics.

use axum::{
    extract::{Query, State},
    http::Method,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::host::server::HostState;
use crate::routing::RouteDeclaration;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub routes: usize,
}

#[derive(Deserialize, Debug)]
pub struct LookupQuery {
    pub path: String,
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "GET".to_string()
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct LookupReport {
    pub path: String,
    pub method: String,
    pub resolved_path: String,
    pub matched: bool,
}

pub async fn get_status(State(state): State<HostState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        routes: state.bridge.get_routes().len(),
    })
}

pub async fn get_routes(State(state): State<HostState>) -> Json<Vec<RouteDeclaration>> {
    Json(state.bridge.get_routes())
}

pub async fn get_lookup(
    State(state): State<HostState>,
    Query(query): Query<LookupQuery>,
) -> Json<LookupReport> {
    let Ok(method) = Method::from_bytes(query.method.to_ascii_uppercase().as_bytes()) else {
        // Not an HTTP method, so it can never match
        return Json(LookupReport {
            resolved_path: query.path.clone(),
            path: query.path,
            method: query.method,
            matched: false,
        });
    };
    let lookup = state.bridge.lookup(&query.path, &method);

    Json(LookupReport {
        path: query.path,
        method: lookup.method.to_string(),
        resolved_path: lookup.path,
        matched: lookup.matched,
    })
}

pub fn setup_admin_router(prefix: &str) -> Router<HostState> {
    Router::new()
        .route(&format!("{}/status", prefix), get(get_status))
        .route(&format!("{}/routes", prefix), get(get_routes))
        .route(&format!("{}/lookup", prefix), get(get_lookup))
}
