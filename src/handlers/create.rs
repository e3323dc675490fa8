use crate::error::{ApiError, RestrictedResponse};
use crate::models::{CreatedResponse, MessageResponse};
use crate::payload::Payload;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /create handler - Store a new item
///
/// Fields come from the JSON body, or from the query string when the request
/// is not JSON. `name`, `description` and `price` are all required.
#[utoipa::path(
    post,
    path = routes::CREATE,
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Item created", body = CreatedResponse),
        (status = 400, description = "Missing field or invalid value", body = MessageResponse),
        (status = 401, description = "Missing or invalid X-API-KEY", body = RestrictedResponse),
        (status = 500, description = "Database error", body = MessageResponse)
    ),
    security(("api_key" = [])),
    tag = "items"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let item = payload.new_item().inspect_err(|e| {
        tracing::info!("Rejected create payload: {}", e);
    })?;

    let id = state.store.insert(&item).await?;

    tracing::info!("Successfully created item with id: {}", id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Item created".to_string(),
            id,
        }),
    ))
}
