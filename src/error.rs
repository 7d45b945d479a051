/*
 * Responsibility
 * - App-wide ApiError definition (AppError)
 * - IntoResponse (HTTP status / JSON error body)
 * - Converts resolver / context errors without leaking their diagnostic text
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::tenant::{ContextError, ResolveError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("forbidden")]
    Forbidden,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::NotFound { resource } => ("not_found", format!("{resource} not found.")),
            AppError::Forbidden => ("FORBIDDEN", "forbidden".into()),
            AppError::Internal => ("INTERNAL_SERVER_ERROR", "internal server error".into()),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        // The resolver already logged the reason; the client only learns the status.
        if e.status().is_server_error() {
            AppError::Internal
        } else {
            AppError::Forbidden
        }
    }
}

impl From<ContextError> for AppError {
    fn from(e: ContextError) -> Self {
        match e {
            // Handler asked for a value the resolver never set (e.g. no base uri configured)
            ContextError::NotPresent(_) => AppError::not_found("tenant context value"),
        }
    }
}
