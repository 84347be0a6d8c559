//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use jaan_core::cart::CartError;

use crate::odoo::OdooError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Odoo API operation failed.
    #[error("Odoo error: {0}")]
    Odoo(#[from] OdooError),

    /// A cart mutation was given invalid arguments.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry; client mistakes are not events
        if matches!(
            self,
            Self::Internal(_)
                | Self::Odoo(OdooError::Http(_) | OdooError::Parse(_) | OdooError::Service(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Odoo(err) => match err {
                OdooError::NotFound(_) => StatusCode::NOT_FOUND,
                OdooError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Cart(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients. The Odoo service
        // message is the exception: checkout flows display it verbatim.
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Odoo(err) => match err {
                OdooError::NotFound(msg) => msg.clone(),
                OdooError::Service(msg) => msg.clone(),
                OdooError::RateLimited(_) => "Service busy, try again shortly".to_string(),
                _ => "External service error".to_string(),
            },
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
