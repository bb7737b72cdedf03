//! Requests served end to end through the host dispatcher.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use serde_json::Value;

use action_bridge::bridge::{BridgeAdapter, RouteSpec, FAILURE_BODY};
use action_bridge::config::{parse_config, BridgeConfig};
use action_bridge::demo;
use action_bridge::framework::{HandlerResult, MicroApp};
use action_bridge::host::HostServer;

mod common;

fn demo_server() -> HostServer {
    let bridge = Arc::new(BridgeAdapter::new(Arc::new(demo::build_app())));
    HostServer::new(BridgeConfig::default(), bridge)
}

async fn panics(_req: Request<Body>) -> HandlerResult {
    panic!("handler bug");
}

async fn late(_req: Request<Body>) -> HandlerResult {
    Ok(Response::new(Body::from("late")))
}

#[tokio::test]
async fn test_dispatches_through_framework_routing() {
    let server = demo_server();

    let (status, body) = common::send(&server, Method::GET, "/users/7", "").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["id"], "7");

    let (status, body) = common::send(&server, Method::POST, "/users", "alice").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "alice");
}

#[tokio::test]
async fn test_handler_sees_host_context() {
    let server = demo_server();

    let (status, body) = common::send(&server, Method::PATCH, "/context", "").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["method"], "PATCH");
    assert_eq!(json["resolved_path"], "/context");
    assert!(!json["request_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_head_served_by_get_route() {
    let server = demo_server();
    let (status, body) = common::send(&server, Method::HEAD, "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty() || body == "action-bridge demo");
}

#[tokio::test]
async fn test_unmatched_is_host_404() {
    let server = demo_server();
    let (status, body) = common::send(&server, Method::GET, "/nope", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "No matching route found");

    let (status, _) = common::send(&server, Method::DELETE, "/users/7", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failures_become_fixed_500() {
    let app = demo::build_app();
    app.get("/panic", panics);
    let (_, bridge) = common::bridged(app);
    let server = HostServer::new(BridgeConfig::default(), bridge);

    for uri in ["/fail", "/panic"] {
        let (status, body) = common::send(&server, Method::GET, uri, "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body, FAILURE_BODY);
    }
}

#[tokio::test]
async fn test_routes_registered_after_startup_are_served() {
    let (app, bridge) = common::bridged(MicroApp::new());
    let server = HostServer::new(BridgeConfig::default(), bridge);

    assert_eq!(common::send(&server, Method::GET, "/late", "").await.0, StatusCode::NOT_FOUND);
    app.get("/late", late);
    assert_eq!(
        common::send(&server, Method::GET, "/late", "").await,
        (StatusCode::OK, "late".to_string())
    );
}

#[tokio::test]
async fn test_admin_endpoints() {
    let server = demo_server();

    let (status, body) = common::send(&server, Method::GET, "/_bridge/routes", "").await;
    assert_eq!(status, StatusCode::OK);
    let routes: Value = serde_json::from_str(&body).unwrap();
    assert!(routes
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["path"] == "/users/:id" && r["method"] == "GET"));

    let (_, body) = common::send(
        &server,
        Method::GET,
        "/_bridge/lookup?path=/users/9&method=head",
        "",
    )
    .await;
    let report: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report["resolved_path"], "/users/:id");
    assert_eq!(report["method"], "GET");
    assert_eq!(report["matched"], true);

    let (status, body) = common::send(
        &server,
        Method::GET,
        "/_bridge/lookup?path=/users/9&method=not%20a%20method",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let report: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report["method"], "not a method");
    assert_eq!(report["resolved_path"], "/users/9");
    assert_eq!(report["matched"], false);
}

#[tokio::test]
async fn test_configured_routes_over_tcp() {
    let config = parse_config(
        r#"
        [[routes]]
        method = "GET"
        path = "/health"
        body = "healthy"

        [[routes]]
        method = "GET"
        path_prefix = "/assets/"
        body = "asset"
        content_type = "text/css"
        "#,
    )
    .unwrap();

    let (_, bridge) = common::bridged(demo::build_app());
    for route in &config.routes {
        bridge.route(RouteSpec::try_from(route).unwrap()).unwrap();
    }
    let (addr, shutdown) = common::start_server(config, bridge).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client.get(format!("http://{}/health", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "healthy");

    let res = client
        .get(format!("http://{}/assets/css/site.css", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/css");

    let res = client
        .get(format!("http://{}/context", addr))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["request_id"], "trace-me");
    assert!(json["remote_addr"].as_str().unwrap().starts_with("127.0.0.1"));

    shutdown.trigger();
}
