//! Router assembly for the Arquimetal API.
//!
//! The server binary and the HTTP tests both call [`build_app_router`], so a
//! request in a test passes through the same layers as one in production.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Mount `/health` and the `/api/v1` tree and wrap them in middleware.
///
/// The last `.layer` call is the outermost, so a request meets the layers in
/// this order:
///
/// 1. CORS preflight and headers
/// 2. `x-request-id` assigned when the caller sent none
/// 3. one INFO span per request, closed with status and latency
/// 4. the request id copied onto the response
/// 5. 408 once `REQUEST_TIMEOUT_SECS` elapses
/// 6. a handler panic turned into a 500
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        // Liveness and database check, open without a token.
        .merge(routes::health::router())
        // Everything else needs a bearer token, checked per handler.
        .nest("/api/v1", routes::api_routes())
        // Innermost: a panicking handler still yields a response.
        .layer(CatchPanicLayer::new())
        // A stalled request is dropped along with its pool connection.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Echo the id so clients can quote it when reporting a failure.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Runs inside SetRequestIdLayer, so the header is already present.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // A UUID per request unless the caller supplied one.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // Outermost, so preflight requests are answered before anything else.
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured front-end origins.
///
/// Only the verbs the API routes use are allowed, and credentials are
/// permitted so the browser forwards the `Authorization` header. An origin
/// in `CORS_ORIGINS` that does not parse stops the server at startup.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::PATCH])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
