#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use gridboard_api::config::ServerConfig;
use gridboard_api::router::build_app_router;
use gridboard_api::state::AppState;
use gridboard_core::definitions::{StaticWidgetRegistry, WidgetDefinition};
use gridboard_core::properties::{PropertyKind, WidgetPropertyDefinition};
use gridboard_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        widgets_file: "widgets.json".to_string(),
    }
}

/// Registry used by all API tests: one free widget, one with required
/// properties, one resource-scoped, one admin-only.
pub fn test_registry() -> StaticWidgetRegistry {
    let prop = |key: &str, kind: PropertyKind, default: &str, required: bool| {
        WidgetPropertyDefinition {
            key: key.to_string(),
            default_value: default.to_string(),
            kind,
            required,
        }
    };
    let def = |key: &str, title: &str| WidgetDefinition {
        key: key.to_string(),
        title: title.to_string(),
        user_roles: Vec::new(),
        scopes: Vec::new(),
        qualifiers: Vec::new(),
        languages: Vec::new(),
        properties: Vec::new(),
    };

    let news = def("news", "Latest News");

    let mut measure_filter = def("measure_filter", "Measure Filter");
    measure_filter.properties = vec![
        prop("filter", PropertyKind::Text, "", true),
        prop("limit", PropertyKind::Integer, "10", false),
    ];

    let mut coverage_trend = def("coverage_trend", "Coverage Trend");
    coverage_trend.scopes = vec!["PRJ".to_string()];
    coverage_trend.properties = vec![
        prop("period_days", PropertyKind::Integer, "30", false),
        prop("show_legend", PropertyKind::Boolean, "true", false),
    ];

    let mut admin_audit = def("admin_audit", "Administration Audit");
    admin_audit.user_roles = vec!["admin".to_string()];

    StaticWidgetRegistry::new(vec![news, measure_filter, coverage_trend, admin_audit])
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        registry: Arc::new(test_registry()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request through the router. `user` becomes the trusted
/// `X-User-Id` gateway header; `roles` the `X-User-Roles` header.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user: Option<DbId>,
    roles: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user {
        builder = builder.header("x-user-id", user_id.to_string());
    }
    if let Some(roles) = roles {
        builder = builder.header("x-user-roles", roles);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None, None).await
}

pub async fn get_as(app: Router, uri: &str, user: DbId) -> Response {
    send(app, Method::GET, uri, Some(user), None, None).await
}

pub async fn post_json_as(app: Router, uri: &str, user: DbId, body: Value) -> Response {
    send(app, Method::POST, uri, Some(user), None, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, None, None, Some(body)).await
}

pub async fn put_json_as(app: Router, uri: &str, user: DbId, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(user), None, Some(body)).await
}

/// Deserialize a response body into JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
