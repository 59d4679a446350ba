// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use validator::ValidationErrors;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to the JSON error bodies:
/// `{ "errors": { <field>: <message> } }` for client errors,
/// `{ "server": <message> }` for unexpected failures.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error - detail is logged, never exposed
    InternalServerError(String),

    // 400 Bad Request - one message per offending field
    Validation(BTreeMap<String, String>),

    // 400 Bad Request - single named field (duplicate email/handle/profile,
    // bad credentials)
    BadRequest(&'static str, String),

    // 401 Unauthorized - status only, no body detail
    AuthError,

    // 403 Forbidden - ownership mismatch
    Forbidden(&'static str, String),

    // 404 Not Found - entity-specific field and message
    NotFound(&'static str, String),
}

impl AppError {
    /// Shorthand for errors carrying a single field/message pair.
    fn single(field: &str, message: String) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), message);
        errors
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                let body = Json(json!({ "server": "Something went wrong" }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            AppError::AuthError => {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, errors),
            AppError::BadRequest(field, msg) => {
                (StatusCode::BAD_REQUEST, Self::single(field, msg))
            }
            AppError::Forbidden(field, msg) => {
                (StatusCode::FORBIDDEN, Self::single(field, msg))
            }
            AppError::NotFound(field, msg) => (StatusCode::NOT_FOUND, Self::single(field, msg)),
        };

        let body = Json(json!({ "errors": errors }));
        (status, body).into_response()
    }
}

/// Flattens `validator` output into a field -> message map, keeping every
/// violation (validation is collect-all, never fail-fast).
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = BTreeMap::new();
        for (field, violations) in errors.field_errors() {
            if let Some(violation) = violations.first() {
                let message = violation
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                map.insert(field.to_string(), message);
            }
        }
        AppError::Validation(map)
    }
}

/// Converts `mongodb::error::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database operations.
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
