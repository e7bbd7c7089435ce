//! HTTP mapping of domain errors
//!
//! Every failed request ends in exactly one JSON body of the form
//! `{"error": ...}`; server-side failures also carry `details`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::DomainError;

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match self {
            DomainError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            DomainError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            DomainError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Database operation failed", "details": msg })),
                )
                    .into_response()
            }
            DomainError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error", "details": msg })),
                )
                    .into_response()
            }
        }
    }
}

/// Turn an extractor rejection (bad JSON, bad multipart) into a 400
pub fn invalid_body(rejection: impl std::fmt::Display) -> DomainError {
    tracing::debug!("Rejected request body: {}", rejection);
    DomainError::validation(format!("Invalid request data: {}", rejection))
}
