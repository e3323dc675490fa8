use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::MessageResponse;

pub const ITEM_MISSING_MESSAGE: &str = "item does not exist on server";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body returned when the API key check fails
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RestrictedResponse {
    #[serde(rename = "Restricted")]
    pub restricted: String,
}

/// Body returned when a retrieve finds nothing
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LookupMissResponse {
    pub response: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// A rejected field in a create, replace or amend payload
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidValue { field: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => {
                write!(f, "Missing required field: '{}'", field)
            }
            ValidationError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Custom error type for API endpoints
///
/// Every variant maps to a fixed status code and body shape. Internal failures
/// are logged in full but answered with a generic 500.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or wrong API key
    Unauthorized,
    /// Retrieve on an id with no row
    RecordNotFound(i64),
    /// Replace, amend or delete on an id with no row
    ItemMissing(i64),
    /// Path segment that is not a non-negative integer id
    InvalidId(String),
    /// Payload field missing or not convertible
    Validation(ValidationError),
    /// JSON body that could not be read as an object
    MalformedBody(String),
    /// Database operation error
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(RestrictedResponse {
                    restricted: "Access Unauthorized".to_string(),
                }),
            )
                .into_response(),
            ApiError::RecordNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(LookupMissResponse {
                    response: format!("No data found for id: {}", id),
                }),
            )
                .into_response(),
            ApiError::ItemMissing(id) => {
                tracing::debug!("No item with id {} to modify", id);
                (
                    StatusCode::NOT_FOUND,
                    Json(MessageResponse::new(ITEM_MISSING_MESSAGE)),
                )
                    .into_response()
            }
            ApiError::InvalidId(raw) => (
                StatusCode::NOT_FOUND,
                Json(MessageResponse::new(format!("No item route matches id '{}'", raw))),
            )
                .into_response(),
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new(err.to_string())),
            )
                .into_response(),
            ApiError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new(format!("Malformed request body: {}", detail))),
            )
                .into_response(),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse::new(INTERNAL_ERROR_MESSAGE)),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}
