use crate::error::{ApiError, RestrictedResponse};
use crate::handlers::ItemId;
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// DELETE /delete/:id handler - Remove an item
///
/// The response names the item as it was when it was removed.
#[utoipa::path(
    delete,
    path = routes::DELETE,
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid X-API-KEY", body = RestrictedResponse),
        (status = 404, description = "Item does not exist", body = MessageResponse),
        (status = 500, description = "Database error", body = MessageResponse)
    ),
    security(("api_key" = [])),
    tag = "items"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    match state.store.delete(id).await? {
        Some(name) => {
            tracing::info!("Successfully deleted item with id: {}", id);
            Ok((
                StatusCode::OK,
                Json(MessageResponse::new(format!("{} deleted", name))),
            ))
        }
        None => {
            tracing::info!("Delete target not found with id: {}", id);
            Err(ApiError::ItemMissing(id))
        }
    }
}
