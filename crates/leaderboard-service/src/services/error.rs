//! Service layer error types
//!
//! Provides a unified error type for the upstream clients and the pipeline.

use leaderboard_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A required credential or setting is missing or unusable
    #[error("{0}")]
    Configuration(String),

    /// Non-success response or query-level error from an upstream API
    #[error("{0}")]
    Upstream(String),

    /// Network-level failure talking to an upstream
    #[error("Transport error: {0}")]
    Transport(String),

    /// Every attempt was rate limited
    #[error("Max retries reached after {attempts} attempts")]
    MaxRetriesExceeded { attempts: u32 },

    /// Store or lookup failure from a port
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ServiceError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::MaxRetriesExceeded { .. } => "MAX_RETRIES_EXCEEDED",
            Self::Domain(e) => e.code(),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
