//! # store-api
//!
//! HTTP API layer for the verdant-cart storefront.
//!
//! This crate provides:
//! - `AppState` wiring the store handle, token signer, and payment gateway
//! - the authorization gate middleware (`require_auth`, `require_admin`)
//! - request handlers for every resource
//! - the router composing gate stages in front of protected routes

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use error::ApiError;
pub use middleware::AuthedUser;
pub use state::{AppConfig, AppState};
