//! Shared-secret gate for the mutating item routes.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Authorized,
    Unauthorized,
}

/// Compare the `X-API-KEY` header against the configured secret.
///
/// A missing, empty or non-UTF-8 header is unauthorized.
pub fn check_api_key(headers: &HeaderMap, expected: &str) -> AuthOutcome {
    let provided = headers
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();

    if !provided.is_empty() && constant_time_eq(provided, expected.as_bytes()) {
        AuthOutcome::Authorized
    } else {
        AuthOutcome::Unauthorized
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Axum middleware that stops unauthenticated requests before they reach a handler.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match check_api_key(req.headers(), &state.config.api_key) {
        AuthOutcome::Authorized => Ok(next.run(req).await),
        AuthOutcome::Unauthorized => {
            tracing::warn!(
                method = %req.method(),
                uri = %req.uri(),
                "Rejected request with missing or invalid API key"
            );
            Err(ApiError::Unauthorized)
        }
    }
}
