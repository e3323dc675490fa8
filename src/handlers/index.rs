use crate::models::WelcomeResponse;
use crate::routes;
use axum::{http::StatusCode, Json};

/// GET / handler - Welcome message pointing at the API documentation
#[utoipa::path(
    get,
    path = routes::INDEX,
    responses(
        (status = 200, description = "Service information", body = WelcomeResponse)
    ),
    tag = "info"
)]
pub async fn index_handler() -> (StatusCode, Json<WelcomeResponse>) {
    (
        StatusCode::OK,
        Json(WelcomeResponse {
            message: "Welcome to our API".to_string(),
            documentation: routes::SWAGGER_UI.to_string(),
            access: "use postman or curl".to_string(),
        }),
    )
}
