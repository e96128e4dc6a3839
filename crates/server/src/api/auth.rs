// Server-only auth helpers shared across the api/* modules.

use dioxus::prelude::*;
use shared_types::{AppError, AuthUser};

use crate::auth::{cookies, jwt};
use crate::db::get_db;
use crate::error_convert::{AppErrorExt, SqlxErrorExt};

/// Extract and validate the caller's identity from the current request.
/// Checks middleware-injected Claims first, falls back to cookie parsing.
pub(crate) fn require_auth() -> Result<jwt::Claims, ServerFnError> {
    let ctx = dioxus::fullstack::FullstackContext::current()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())?;

    let parts = ctx.parts_mut();

    // Primary: Claims already validated by the session middleware
    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Ok(claims.clone());
    }

    // Fallback: parse the token from cookies/Bearer header
    let headers = parts.headers.clone();
    let token = cookies::extract_session_token(&headers)
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())?;

    jwt::validate_session_token(&token)
        .map_err(|_| AppError::unauthorized("Invalid or expired session").into_server_fn_error())
}

/// Require the caller to be authenticated with the "admin" role.
pub(crate) fn require_admin() -> Result<jwt::Claims, ServerFnError> {
    let claims = require_auth()?;
    if claims.role != "admin" {
        return Err(AppError::forbidden("Admin role required").into_server_fn_error());
    }
    Ok(claims)
}

/// Fetch a full AuthUser by user ID.
/// Returns None and clears the session cookie if the account no longer exists,
/// so the client does not stay stuck half-authenticated.
pub(crate) async fn fetch_auth_user(user_id: i64) -> Result<Option<AuthUser>, ServerFnError> {
    let pool = get_db().await;
    let user = crate::repo::user::find_by_id(pool, user_id)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    match user {
        Some(row) => Ok(Some(row.into_auth_user())),
        None => {
            cookies::schedule_clear_cookie();
            tracing::warn!(user_id, "session token references a missing user");
            Ok(None)
        }
    }
}
