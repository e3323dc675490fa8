pub mod amend;
pub mod create;
pub mod delete;
pub mod get;
pub mod health;
pub mod index;
pub mod list;
pub mod replace;

#[cfg(test)]
pub(crate) mod testing;

pub use amend::amend_handler;
pub use create::create_handler;
pub use delete::delete_handler;
pub use get::get_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use list::list_handler;
pub use replace::replace_handler;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::ApiError;

/// Item id taken from the `{id}` path segment.
///
/// Any segment that is not a plain decimal id, including one that does not
/// percent-decode to UTF-8, is rejected as a JSON 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub i64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Unusable id segment in {}: {}", parts.uri.path(), rejection);
                ApiError::InvalidId(parts.uri.path().to_string())
            })?;
        parse_item_id(&raw).map(ItemId)
    }
}

/// Parse an `{id}` path segment.
///
/// Only plain decimal digits are ids; anything else is treated as a routing
/// miss rather than reaching the store.
pub(crate) fn parse_item_id(raw: &str) -> Result<i64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidId(raw.to_string()));
    }
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}
