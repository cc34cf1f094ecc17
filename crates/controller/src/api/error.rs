//! Handler errors rendered as response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

use super::response::{
    respond, FAILED_DB_CONN_MESSAGE, FAILED_PAYLOAD_VALIDATION_MESSAGE, PARAM_IS_NOT_INT_MESSAGE,
};

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A URL parameter that must be an integer is not one
    #[error("URL parameter '{name}' is not an integer: '{value}'")]
    ParamNotInt { name: String, value: String },

    /// Database call failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request payload failed validation
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ParamNotInt { .. } => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// The client-facing message constant for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::ParamNotInt { .. } => PARAM_IS_NOT_INT_MESSAGE,
            ApiError::Database(_) => FAILED_DB_CONN_MESSAGE,
            ApiError::Validation(_) => FAILED_PAYLOAD_VALIDATION_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(e) => tracing::error!(error = %e, "Database error"),
            other => tracing::debug!(error = %other, "Request rejected"),
        }

        respond(self.status(), Value::Null, self.message(), None)
    }
}
