//! Item read handlers: full snapshot and single-item lookup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ItemResponse, ItemsResponse};
use crate::app_state::AppState;
use crate::domain::ItemId;
use crate::error::{AuctionError, ErrorResponse};

/// `GET /items` — Full catalog snapshot with the authoritative time.
///
/// Clients use `serverTime` to compute the display offset for their
/// countdowns; the countdown deadline itself is each item's `endTime`.
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    summary = "List auction items",
    description = "Returns every live auction item with its current bid state, plus the authoritative server time.",
    responses(
        (status = 200, description = "Current catalog snapshot", body = ItemsResponse),
    )
)]
pub async fn list_items(State(state): State<AppState>) -> impl IntoResponse {
    Json(ItemsResponse {
        items: state.auction_service.snapshot().await,
        server_time: state.auction_service.server_time(),
    })
}

/// `GET /items/{id}` — Single item snapshot.
///
/// # Errors
///
/// Returns [`AuctionError::ItemNotFound`] if the item does not exist.
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    summary = "Get one auction item",
    description = "Returns the current state of a single item.",
    params(
        ("id" = uuid::Uuid, Path, description = "Item UUID"),
    ),
    responses(
        (status = 200, description = "Item snapshot", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, AuctionError> {
    let item = state
        .auction_service
        .get(ItemId::from_uuid(id))
        .await
        .ok_or(AuctionError::ItemNotFound(id))?;

    Ok(Json(ItemResponse {
        item,
        server_time: state.auction_service.server_time(),
    }))
}

/// Item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/{id}", get(get_item))
}
