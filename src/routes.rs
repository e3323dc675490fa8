// Route path constants - single source of truth for all API paths

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::auth::require_api_key;
use crate::handlers;
use crate::state::AppState;

pub const INDEX: &str = "/";
pub const HEALTH: &str = "/health";
pub const ITEMS: &str = "/items";
pub const RETRIEVE: &str = "/retrieve/{id}";
pub const CREATE: &str = "/create";
pub const REPLACE: &str = "/replace/{id}";
pub const AMEND: &str = "/amend/{id}";
pub const DELETE: &str = "/delete/{id}";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the full application router.
///
/// The API key check is a route layer on the mutating routes only, so it runs
/// after routing and before any body parsing.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route(CREATE, post(handlers::create_handler))
        .route(REPLACE, put(handlers::replace_handler))
        .route(AMEND, patch(handlers::amend_handler))
        .route(DELETE, delete(handlers::delete_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route(INDEX, get(handlers::index_handler))
        .route(HEALTH, get(handlers::health_handler))
        .route(ITEMS, get(handlers::list_handler))
        .route(RETRIEVE, get(handlers::get_handler))
        .merge(protected)
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
