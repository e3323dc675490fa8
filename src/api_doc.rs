use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::API_KEY_HEADER;
use crate::error::{HealthResponse, LookupMissResponse, RestrictedResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{CreatedResponse, Item, ListResponse, MessageResponse, WelcomeResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "item-store-api",
        version = "1.0.0",
        description = "A small item catalogue with API-key protected writes, backed by SQLite"
    ),
    paths(
        handlers::index::index_handler,
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::create::create_handler,
        handlers::replace::replace_handler,
        handlers::amend::amend_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            Item,
            ListResponse,
            CreatedResponse,
            MessageResponse,
            WelcomeResponse,
            LookupMissResponse,
            RestrictedResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    modifiers(&ApiKeyAddon),
    tags(
        (name = "info", description = "Service information"),
        (name = "health", description = "Health check operations"),
        (name = "items", description = "Item operations")
    )
)]
pub struct ApiDoc;

/// Registers the `X-API-KEY` header scheme referenced by the mutating routes
struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}
