//! Response types and error handling for API endpoints
//!
//! Every failure is rendered as `{success: false, error, code, details?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use leaderboard_common::ErrorResponse;
use leaderboard_service::ServiceError;
use thiserror::Error;
use tracing::error;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    /// A pipeline run that did not produce a snapshot
    #[error("{0}")]
    Refresh(#[source] ServiceError),

    /// Proxy failure answered with an explicit status
    #[error("{error}")]
    Proxy {
        status: StatusCode,
        error: String,
        code: &'static str,
        details: Option<String>,
    },

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid bearer token")]
    InvalidToken,
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Refresh(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Proxy { status, .. } => *status,
            Self::MissingAuth | Self::InvalidToken => StatusCode::UNAUTHORIZED,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Refresh(e) => e.error_code(),
            Self::Proxy { code, .. } => code,
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidToken => "INVALID_TOKEN",
        }
    }

    /// Create a proxy error
    pub fn proxy(
        status: StatusCode,
        error: impl Into<String>,
        code: &'static str,
        details: Option<String>,
    ) -> Self {
        Self::Proxy {
            status,
            error: error.into(),
            code,
            details,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Proxy { details, .. } => details.clone(),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let mut body = ErrorResponse::new(self.to_string(), self.error_code());
        if let Some(details) = self.details() {
            body = body.with_details(details);
        }

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
