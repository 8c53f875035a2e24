//! # Shop Error Types
//!
//! Typed error handling for the storefront backend.
//! All fallible operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing credentials, invalid config)
    #[error("{0}")]
    Configuration(String),

    /// A required request field is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Email address failed validation
    #[error("Invalid email address")]
    InvalidEmail,

    /// External provider (Stripe, Resend) rejected the request
    #[error("{message}")]
    Provider {
        provider: String,
        message: String,
        code: Option<String>,
    },

    /// Network/HTTP error communicating with a provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unexpected internal error
    #[error("Internal server error")]
    Internal(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::MissingField(_) => 400,
            ShopError::InvalidRequest(_) => 400,
            ShopError::InvalidEmail => 400,
            ShopError::Provider { .. } => 500,
            ShopError::Network(_) => 500,
            ShopError::Serialization(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }

    /// True if the failure is on the client's side of the request
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
