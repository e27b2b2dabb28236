//! Shared helpers for the HTTP integration tests.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`;
//! no TCP listener is involved. Every helper except [`send_without_auth`]
//! attaches a valid Bearer token.

#![allow(dead_code)]

use std::sync::Arc;

use arquimetal_api::auth::jwt::{generate_access_token, JwtConfig};
use arquimetal_api::config::ServerConfig;
use arquimetal_api::router::build_app_router;
use arquimetal_api::state::AppState;
use arquimetal_events::EventBus;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SUBJECT: &str = "test-user";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router for `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool).0
}

/// Build the router and hand back its event bus so tests can subscribe.
pub fn build_test_app_with_bus(pool: PgPool) -> (Router, Arc<EventBus>) {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };
    (build_app_router(state, &config), event_bus)
}

/// Router over a pool that never connects. For tests that must be rejected
/// before any query runs.
pub fn build_app_without_db() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/arquimetal_unused")
        .expect("lazy pool from a well-formed URL");
    build_test_app(pool)
}

/// A valid Bearer token for [`TEST_SUBJECT`].
pub fn token() -> String {
    generate_access_token(TEST_SUBJECT, &test_config().jwt).expect("token generation")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token()));
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json)).await
}

/// POST with no body, as used to append an invoice.
pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn patch_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(json)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send a request with an arbitrary (or no) `Authorization` header.
pub async fn send_without_auth(
    app: Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a client through the API and return its id.
pub async fn create_client(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/clients",
        serde_json::json!({
            "name": name,
            "industry": "Construcción",
            "responsible_name": "Ana Pérez",
            "responsible_title": "Gerente",
            "contact_number": "5491155554444",
            "national_id": "30712345678",
            "email": "compras@example.com",
            "labels": ["Minería"]
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a contact under a client through the API and return its id.
pub async fn create_contact(pool: &PgPool, client_id: i64, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/clients/{client_id}/contacts"),
        serde_json::json!({
            "name": name,
            "job_title": "Jefe de obra",
            "national_id": "20123456789",
            "phone": "1155550000"
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a proposal through the API and return its JSON body.
pub async fn create_proposal(
    pool: &PgPool,
    client_id: i64,
    name: &str,
    amount: Option<&str>,
) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/proposals",
        serde_json::json!({
            "client_id": client_id,
            "name": name,
            "amount": amount,
            "proposal_number": "20240017"
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Create a project directly through the API and return its JSON body.
pub async fn create_project(pool: &PgPool, client_id: i64, name: &str) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        serde_json::json!({ "client_id": client_id, "name": name }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// PATCH a proposal's status and return the raw response.
pub async fn set_proposal_status(pool: &PgPool, proposal_id: i64, status: &str) -> Response<Body> {
    patch_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/proposals/{proposal_id}"),
        serde_json::json!({ "status": status }),
    )
    .await
}

/// Number of rows in the `projects` table.
pub async fn project_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await
        .unwrap()
}
