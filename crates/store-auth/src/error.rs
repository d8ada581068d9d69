//! # Auth Error Types
//!
//! The gate's error taxonomy. Status codes and message bodies are part of
//! the security contract and must not drift:
//! - no credential presented → 401 "Unauthorized access"
//! - credential invalid or expired → 403 "Forbidden access"
//! - credential valid but not admin → 403 "forbidden"

use thiserror::Error;

/// Error type for token verification and the role check
#[derive(Debug, Error)]
pub enum AuthError {
    /// Configuration errors (missing or unusable signing secret)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No `Authorization` header on the request
    #[error("No credential presented")]
    MissingCredentials,

    /// Token failed structural or signature checks
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token signature is valid but the expiry has passed
    #[error("Token expired")]
    TokenExpired,

    /// Verified identity lacks the admin role (or has no user record)
    #[error("Not an admin")]
    NotAdmin,
}

impl AuthError {
    /// HTTP status code for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Configuration(_) => 500,
            AuthError::MissingCredentials => 401,
            AuthError::InvalidToken(_) => 403,
            AuthError::TokenExpired => 403,
            AuthError::NotAdmin => 403,
        }
    }

    /// Response body message for this failure
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::Configuration(_) => "Internal server error",
            AuthError::MissingCredentials => "Unauthorized access",
            AuthError::InvalidToken(_) => "Forbidden access",
            AuthError::TokenExpired => "Forbidden access",
            AuthError::NotAdmin => "forbidden",
        }
    }
}

/// Result type alias for auth operations
pub type AuthResult<T> = Result<T, AuthError>;
