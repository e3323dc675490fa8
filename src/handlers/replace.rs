use crate::error::{ApiError, RestrictedResponse};
use crate::handlers::ItemId;
use crate::models::MessageResponse;
use crate::payload::Payload;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// PUT /replace/:id handler - Overwrite every field of an existing item
///
/// A missing item wins over an invalid payload: both yield 404 when the id
/// does not exist.
#[utoipa::path(
    put,
    path = routes::REPLACE,
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Item replaced", body = MessageResponse),
        (status = 400, description = "Missing field or invalid value", body = MessageResponse),
        (status = 401, description = "Missing or invalid X-API-KEY", body = RestrictedResponse),
        (status = 404, description = "Item does not exist", body = MessageResponse),
        (status = 500, description = "Database error", body = MessageResponse)
    ),
    security(("api_key" = [])),
    tag = "items"
)]
pub async fn replace_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    payload: Result<Payload, ApiError>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let item = match payload.and_then(|p| p.new_item().map_err(ApiError::from)) {
        Ok(item) => item,
        Err(err) => {
            if state.store.get(id).await?.is_none() {
                return Err(ApiError::ItemMissing(id));
            }
            tracing::info!("Rejected replace payload for item {}: {:?}", id, err);
            return Err(err);
        }
    };

    if !state.store.replace(id, &item).await? {
        tracing::info!("Replace target not found with id: {}", id);
        return Err(ApiError::ItemMissing(id));
    }

    tracing::info!("Successfully replaced item with id: {}", id);
    Ok((StatusCode::OK, Json(MessageResponse::new("Item replaced"))))
}
