use crate::error::ApiError;
use crate::models::{ListResponse, MessageResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

pub const EMPTY_STORE_MESSAGE: &str = "Database is empty";

/// GET /items handler - List all items
///
/// Returns every item ordered by id. An empty store is not an error: the
/// response is a `{"message": "Database is empty"}` object instead of an array.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "All items, or an empty-store message", body = ListResponse),
        (status = 500, description = "Database error", body = MessageResponse)
    ),
    tag = "items"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let items = state.store.list().await?;

    tracing::info!("Listed {} items", items.len());

    let response = if items.is_empty() {
        ListResponse::Empty(MessageResponse::new(EMPTY_STORE_MESSAGE))
    } else {
        ListResponse::Items(items)
    };

    Ok((StatusCode::OK, Json(response)))
}
