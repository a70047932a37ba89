//! System endpoints: health check, time resync, administrative reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::{ResetResponse, TimeResponse};
use crate::app_state::AppState;
use crate::domain::clock::millis_to_rfc3339;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: millis_to_rfc3339(state.auction_service.server_time()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /time` — Explicit time resync.
///
/// Clients compare `timestamp` against their local clock to compute the
/// display-only offset; the server never accepts a client-supplied time
/// for any decision.
#[utoipa::path(
    get,
    path = "/time",
    tag = "System",
    summary = "Server time",
    description = "Returns the authoritative server time as epoch milliseconds and RFC 3339.",
    responses(
        (status = 200, description = "Current server time", body = TimeResponse),
    )
)]
pub async fn time_handler(State(state): State<AppState>) -> impl IntoResponse {
    let now = state.auction_service.server_time();
    Json(TimeResponse {
        timestamp: now,
        server_time: millis_to_rfc3339(now),
    })
}

/// `POST /reset` — Clear and re-seed the catalog. Test/ops use only.
///
/// Connected clients receive a fresh `INIT_ITEMS` broadcast so nobody is
/// left looking at stale lots.
#[utoipa::path(
    post,
    path = "/reset",
    tag = "System",
    summary = "Reset the catalog",
    description = "Clears all items, re-seeds the catalog with fresh cycles, and broadcasts the new snapshot.",
    responses(
        (status = 200, description = "Catalog reset", body = ResetResponse),
    )
)]
pub async fn reset_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.auction_service.reset().await;
    Json(ResetResponse {
        success: true,
        message: "Items reset successfully".to_string(),
    })
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/time", get(time_handler))
        .route("/reset", post(reset_handler))
}
