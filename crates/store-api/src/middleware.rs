//! # Authorization Gate
//!
//! The ordered capability pipeline in front of protected handlers:
//! `require_auth` (token verification) runs first, then `require_admin`
//! (role check) on elevated routes, then the handler.
//!
//! Contract:
//! - missing `Authorization` header → 401 `{ "message": "Unauthorized access" }`
//! - invalid or expired token → 403 `{ "message": "Forbidden access" }`
//! - verified identity without an admin user record → 403 `{ "message": "forbidden" }`
//!
//! The token is the substring after the first space of the header value;
//! the scheme prefix itself is not checked.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use store_auth::AuthError;
use tracing::debug;

/// Verified identity attached to the request after token verification
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub email: String,
}

/// Token verification stage. Does not touch the database.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = header
        .split_once(' ')
        .map(|(_, token)| token)
        .ok_or_else(|| AuthError::InvalidToken("Missing token in header".to_string()))?;

    let claims = state.signer.verify(token)?;
    debug!("Verified token for {}", claims.email);

    req.extensions_mut().insert(AuthedUser {
        email: claims.email,
    });
    Ok(next.run(req).await)
}

/// Role check stage. Must run after `require_auth`; reads the identity it
/// attached and permits only users whose record exists with the admin role.
/// A missing record is an explicit not-admin decision.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authed = req
        .extensions()
        .get::<AuthedUser>()
        .cloned()
        .ok_or(AuthError::NotAdmin)?;

    let record = state
        .store
        .users
        .find_first(|u| u.email == authed.email)
        .await?;

    match record {
        Some(user) if user.is_admin() => Ok(next.run(req).await),
        _ => {
            debug!("Admin check failed for {}", authed.email);
            Err(AuthError::NotAdmin.into())
        }
    }
}
