//! HTTP surface: routes, standard layers, error mapping and request gating.

pub mod artifacts;
pub mod auth;
pub mod error;
pub mod rate_limit;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde::Serialize;
use std::time::Duration;
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use self::error::{METHOD_NOT_ALLOWED_MESSAGE, ROUTE_NOT_FOUND_MESSAGE};
pub use self::error::{ApiError, ApiResult};
pub use self::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the CMS Backend API";
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
}

pub fn router(state: AppState, service_name: &'static str) -> Router {
    let api = Router::new()
        .route(
            "/artifacts",
            post(artifacts::create).get(artifacts::list),
        )
        .route("/artifacts/{id}/like", post(artifacts::toggle_like))
        .route("/artifacts/{id}/likes", get(artifacts::likes))
        .route("/artifacts/{id}/comment", post(artifacts::add_comment))
        .route("/artifacts/{id}/comments", get(artifacts::comments))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ));

    let router = Router::new()
        .route("/", get(welcome))
        .route("/healthz", get(healthz))
        .nest("/api", api)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .with_state(state);

    apply_standard_layers(router, service_name)
}

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus { status: "ok" }))
}

async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND_MESSAGE)
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

pub fn apply_standard_layers(router: Router, service_name: &'static str) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(move |request: &axum::http::Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http.request",
                service = service_name,
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let request_id_header = HeaderName::from_static("x-request-id");

    router
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(CorsLayer::permissive())
        .layer(trace)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}
