//! # store-auth
//!
//! Session token issuance and verification for the verdant-cart storefront.
//!
//! This crate provides:
//! - `TokenSigner` for minting and verifying HMAC-SHA256 signed tokens
//! - `AuthConfig` for the signing secret and the two token lifetimes
//! - `AuthError` carrying the gate's exact status codes and messages
//!
//! The HTTP middleware that wires these into the request pipeline lives in
//! `store-api`; this crate has no knowledge of HTTP or the database.

pub mod config;
pub mod error;
pub mod token;

// Re-exports for convenience
pub use config::{AuthConfig, DEFAULT_LOGIN_TTL_SECS, DEFAULT_SESSION_TTL_SECS};
pub use error::{AuthError, AuthResult};
pub use token::{Claims, TokenSigner};
