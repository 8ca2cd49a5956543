//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Storage Errors
    // =========================================================================
    #[error("Snapshot store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // =========================================================================
    // Name Directory Errors
    // =========================================================================
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Name lookup failed: {0}")]
    Lookup(String),
}

impl DomainError {
    /// Get error code for API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(_) => "STORE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::InvalidAddress(_) => "INVALID_ADDRESS",
            Self::Lookup(_) => "LOOKUP_ERROR",
        }
    }

    /// Check if the error came from the snapshot store
    #[must_use]
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Serialization(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
