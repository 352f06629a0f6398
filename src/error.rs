use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed on {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("items unavailable")]
    ItemsUnavailable { item_ids: Vec<Uuid> },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "kind": "validation_error",
                    "error": self.to_string(),
                    "field": field,
                    "message": message,
                }),
            ),
            AppError::ItemsUnavailable { item_ids } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "kind": "items_unavailable",
                    "error": "some items are not available",
                    "item_ids": item_ids,
                }),
            ),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({
                    "kind": "not_found",
                    "error": message,
                }),
            ),
            AppError::InvalidTransition { from, to } => (
                StatusCode::CONFLICT,
                json!({
                    "kind": "invalid_transition",
                    "error": self.to_string(),
                    "from": from,
                    "to": to,
                }),
            ),
            AppError::IntegrityViolation(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "kind": "integrity_violation",
                    "error": message,
                }),
            ),
            AppError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "kind": "internal",
                    "error": message,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
