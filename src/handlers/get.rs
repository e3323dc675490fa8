use crate::error::{ApiError, LookupMissResponse};
use crate::handlers::ItemId;
use crate::models::{Item, MessageResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /retrieve/:id handler - Retrieve a single item
#[utoipa::path(
    get,
    path = routes::RETRIEVE,
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "No item with this id", body = LookupMissResponse),
        (status = 500, description = "Database error", body = MessageResponse)
    ),
    tag = "items"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    match state.store.get(id).await? {
        Some(item) => {
            tracing::info!("Successfully retrieved item with id: {}", id);
            Ok((StatusCode::OK, Json(item)))
        }
        None => {
            tracing::info!("Item not found with id: {}", id);
            Err(ApiError::RecordNotFound(id))
        }
    }
}
