//! # Session Tokens
//!
//! Signed, time-limited session tokens bound to an email identity.
//!
//! Wire format: `<base64url(claims JSON)>.<hex hmac-sha256>`. The claims
//! segment carries `{ email, iat, exp }`; the signature covers the encoded
//! claims segment. Tokens are never stored server-side and cannot be
//! revoked early; expiry is the only invalidation path.

use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Decoded token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity the token is bound to
    pub email: String,

    /// Issued-at (seconds since epoch)
    pub iat: i64,

    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Issues and verifies session tokens against the shared signing secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    /// Create a signer from loaded configuration
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Mint a token for `email` expiring `ttl` from now
    pub fn issue(&self, email: &str, ttl: Duration) -> String {
        self.issue_at(email, ttl, Utc::now())
    }

    /// Mint a token with an explicit clock (for tests)
    pub fn issue_at(&self, email: &str, ttl: Duration, now: DateTime<Utc>) -> String {
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + ttl.as_secs() as i64,
        };

        // Claims are plain serializable fields; this cannot fail.
        let payload = serde_json::to_vec(&claims).unwrap_or_default();
        let encoded = URL_SAFE_NO_PAD.encode(payload);
        let signature = compute_hmac_sha256(&self.secret, &encoded);

        tracing::debug!("Minted token for {} (ttl {}s)", email, ttl.as_secs());
        format!("{}.{}", encoded, signature)
    }

    /// Verify a token's structure, signature, and expiry
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verify with an explicit clock (for tests)
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let (encoded, signature) = token
            .split_once('.')
            .ok_or_else(|| AuthError::InvalidToken("Malformed token".to_string()))?;

        let expected = compute_hmac_sha256(&self.secret, encoded);
        if !constant_time_compare(signature, &expected) {
            return Err(AuthError::InvalidToken("Signature mismatch".to_string()));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| AuthError::InvalidToken("Bad claims encoding".to_string()))?;

        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|_| AuthError::InvalidToken("Bad claims payload".to_string()))?;

        if claims.exp <= now.timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn signer() -> TokenSigner {
        TokenSigner::new(&AuthConfig::new("unit-test-signing-secret"))
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let signer = signer();
        let token = signer.issue("shopper@example.com", Duration::from_secs(3600));

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.email, "shopper@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let issued = Utc::now();
        let token = signer.issue_at("shopper@example.com", Duration::from_secs(60), issued);

        // Still valid just before expiry
        let just_before = issued + ChronoDuration::seconds(59);
        assert!(signer.verify_at(&token, just_before).is_ok());

        // Rejected once the ttl has elapsed
        let after = issued + ChronoDuration::seconds(61);
        assert!(matches!(
            signer.verify_at(&token, after).unwrap_err(),
            AuthError::TokenExpired
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = signer().issue("shopper@example.com", Duration::from_secs(3600));

        let other = TokenSigner::new(&AuthConfig::new("a-different-signing-secret"));
        assert!(matches!(
            other.verify(&token).unwrap_err(),
            AuthError::InvalidToken(_)
        ));
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let signer = signer();
        let token = signer.issue("shopper@example.com", Duration::from_secs(3600));
        let (_, signature) = token.split_once('.').unwrap();

        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims {
                email: "admin@example.com".to_string(),
                iat: Utc::now().timestamp(),
                exp: Utc::now().timestamp() + 3600,
            })
            .unwrap(),
        );
        let forged = format!("{}.{}", forged_claims, signature);

        assert!(matches!(
            signer.verify(&forged).unwrap_err(),
            AuthError::InvalidToken(_)
        ));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let signer = signer();
        for bad in ["", "no-dot-here", "a.b.c.d", "!!!.???"] {
            assert!(matches!(
                signer.verify(bad).unwrap_err(),
                AuthError::InvalidToken(_)
            ));
        }
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
