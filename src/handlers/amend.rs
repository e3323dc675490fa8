use crate::error::{ApiError, RestrictedResponse};
use crate::handlers::ItemId;
use crate::models::MessageResponse;
use crate::payload::Payload;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// PATCH /amend/:id handler - Partially update an existing item
///
/// Fields absent from the payload keep their stored values. Fields that are
/// present go through the same checks as create and replace.
#[utoipa::path(
    patch,
    path = routes::AMEND,
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Item updated", body = MessageResponse),
        (status = 400, description = "Invalid value for a supplied field", body = MessageResponse),
        (status = 401, description = "Missing or invalid X-API-KEY", body = RestrictedResponse),
        (status = 404, description = "Item does not exist", body = MessageResponse),
        (status = 500, description = "Database error", body = MessageResponse)
    ),
    security(("api_key" = [])),
    tag = "items"
)]
pub async fn amend_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    payload: Result<Payload, ApiError>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let patch = match payload.and_then(|p| p.item_patch().map_err(ApiError::from)) {
        Ok(patch) => patch,
        Err(err) => {
            if state.store.get(id).await?.is_none() {
                return Err(ApiError::ItemMissing(id));
            }
            tracing::info!("Rejected amend payload for item {}: {:?}", id, err);
            return Err(err);
        }
    };

    if patch.is_empty() {
        tracing::debug!("Amend for item {} carries no fields", id);
    }

    if !state.store.amend(id, &patch).await? {
        tracing::info!("Amend target not found with id: {}", id);
        return Err(ApiError::ItemMissing(id));
    }

    tracing::info!("Successfully amended item with id: {}", id);
    Ok((StatusCode::OK, Json(MessageResponse::new("Item updated"))))
}
