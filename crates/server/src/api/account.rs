use dioxus::prelude::*;
use shared_types::AuthUser;

#[cfg(feature = "server")]
use super::auth::fetch_auth_user;
#[cfg(feature = "server")]
use crate::db::get_db;

/// Create an account and start a session for it.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn register(
    email: String,
    password: String,
    display_name: String,
) -> Result<AuthUser, ServerFnError> {
    use crate::auth::{cookies, jwt, password as pw};
    use crate::error_convert::{AppErrorExt, SqlxErrorExt, ValidateRequest};
    use shared_types::{AppError, RegisterRequest};

    let req = RegisterRequest {
        email: email.clone(),
        password: password.clone(),
        display_name: display_name.clone(),
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let password_hash = pw::hash_password(&password)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;

    let pool = get_db().await;
    let user = crate::repo::user::create(pool, &email, &password_hash, &display_name)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    let role = crate::auth::maybe_promote_admin(pool, user.id, &user.email, user.role.clone()).await;

    let token = jwt::create_session_token(user.id, &user.email, &role)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;
    cookies::schedule_session_cookie(&token);

    let mut auth_user = user.into_auth_user();
    auth_user.role = role;
    Ok(auth_user)
}

/// Sign in with email and password.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<AuthUser, ServerFnError> {
    use crate::auth::{cookies, jwt, password as pw};
    use crate::error_convert::{AppErrorExt, SqlxErrorExt, ValidateRequest};
    use shared_types::{AppError, LoginRequest};

    let req = LoginRequest {
        email: email.clone(),
        password: password.clone(),
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let pool = get_db().await;
    let user = crate::repo::user::find_by_email(pool, &email)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?
        .ok_or_else(|| {
            AppError::unauthorized("Incorrect email or password").into_server_fn_error()
        })?;

    let valid = pw::verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;

    if !valid {
        return Err(AppError::unauthorized("Incorrect email or password").into_server_fn_error());
    }

    let role = crate::auth::maybe_promote_admin(pool, user.id, &user.email, user.role.clone()).await;

    let token = jwt::create_session_token(user.id, &user.email, &role)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;
    cookies::schedule_session_cookie(&token);

    let mut auth_user = user.into_auth_user();
    auth_user.role = role;
    Ok(auth_user)
}

/// End the current session.
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::auth::cookies;

    cookies::schedule_clear_cookie();
    Ok(())
}

/// Resolve the current session, if any. Guests get `None`, not an error.
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    use crate::auth::{cookies, jwt};

    let ctx = match dioxus::fullstack::FullstackContext::current() {
        Some(c) => c,
        None => return Ok(None),
    };

    let parts = ctx.parts_mut();

    // Primary: read Claims from extensions (the middleware already validated them)
    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        let user_id = claims.sub;
        return fetch_auth_user(user_id).await;
    }

    // Fallback: parse the cookie directly (covers requests the middleware missed)
    let headers = parts.headers.clone();
    if let Some(token) = cookies::extract_session_token(&headers) {
        if let Ok(claims) = jwt::validate_session_token(&token) {
            return fetch_auth_user(claims.sub).await;
        }
    }

    Ok(None)
}
