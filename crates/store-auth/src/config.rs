//! # Auth Configuration
//!
//! Signing secret and token lifetimes, loaded once from the environment at
//! startup and never mutated afterwards.
//!
//! The two ttl values are deliberately independent: the profile-upsert
//! route family mints short-lived tokens while the login route family
//! mints long-lived ones. Both are configurable rather than hardcoded.

use crate::error::AuthError;
use std::env;
use std::time::Duration;

/// Default session token lifetime: 1 hour
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Default login token lifetime: 2 days
pub const DEFAULT_LOGIN_TTL_SECS: u64 = 172_800;

/// Auth configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC signing secret
    pub secret: String,

    /// Lifetime of tokens minted by the profile upsert route
    pub session_ttl: Duration,

    /// Lifetime of tokens minted by the login route
    pub login_ttl: Duration,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `ACCESS_TOKEN_SECRET`
    ///
    /// Optional env vars:
    /// - `ACCESS_TOKEN_TTL_SECS` (default 3600)
    /// - `LOGIN_TOKEN_TTL_SECS` (default 172800)
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret = env::var("ACCESS_TOKEN_SECRET").map_err(|_| {
            AuthError::Configuration("ACCESS_TOKEN_SECRET not set".to_string())
        })?;

        if secret.len() < 16 {
            return Err(AuthError::Configuration(
                "ACCESS_TOKEN_SECRET must be at least 16 bytes".to_string(),
            ));
        }

        let session_ttl = ttl_from_env("ACCESS_TOKEN_TTL_SECS", DEFAULT_SESSION_TTL_SECS);
        let login_ttl = ttl_from_env("LOGIN_TOKEN_TTL_SECS", DEFAULT_LOGIN_TTL_SECS);

        Ok(Self {
            secret,
            session_ttl,
            login_ttl,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            login_ttl: Duration::from_secs(DEFAULT_LOGIN_TTL_SECS),
        }
    }

    /// Builder: set the session ttl
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Builder: set the login ttl
    pub fn with_login_ttl(mut self, ttl: Duration) -> Self {
        self.login_ttl = ttl;
        self
    }
}

fn ttl_from_env(var: &str, default_secs: u64) -> Duration {
    let secs = env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_defaults() {
        let config = AuthConfig::new("a-sufficiently-long-secret");
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.login_ttl, Duration::from_secs(172_800));
    }

    #[test]
    fn test_ttl_builders() {
        let config = AuthConfig::new("a-sufficiently-long-secret")
            .with_session_ttl(Duration::from_secs(60))
            .with_login_ttl(Duration::from_secs(120));

        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert_eq!(config.login_ttl, Duration::from_secs(120));
    }
}
