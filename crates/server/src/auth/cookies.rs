use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

use super::jwt;

pub const SESSION_COOKIE: &str = "renthub_session";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

/// Build a Set-Cookie header value for the session token.
pub fn build_session_cookie(token: &str) -> HeaderValue {
    let max_age_hours = jwt::session_ttl_hours();
    let mut builder = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_hours * 3600))
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        builder = builder.domain(domain);
    }

    HeaderValue::from_str(&builder.build().to_string())
        .expect("cookie header value should be valid")
}

/// Build a Set-Cookie header that clears the session cookie.
pub fn build_clear_cookie() -> HeaderValue {
    let cleared = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .build();

    HeaderValue::from_str(&cleared.to_string()).expect("clear cookie should be valid")
}

/// Extract the session token from cookies (preferred) or Bearer header (fallback).
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, SESSION_COOKIE) {
        return Some(token);
    }

    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    None
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}

/// Pending cookie action to be applied by the session middleware.
/// Stored in request extensions as `Arc<Mutex<>>` so server functions can
/// populate it mid-request.
#[derive(Clone, Debug)]
pub enum PendingCookieAction {
    Set { token: String },
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

/// Schedule the session cookie to be set by the middleware.
/// Called from server functions; reads the CookieSlot from FullstackContext extensions.
pub fn schedule_session_cookie(token: &str) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            *slot.0.lock().unwrap() = Some(PendingCookieAction::Set {
                token: token.to_string(),
            });
        }
    }
}

/// Schedule the session cookie to be cleared by the middleware.
pub fn schedule_clear_cookie() {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            *slot.0.lock().unwrap() = Some(PendingCookieAction::Clear);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_session_cookie_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("other=1; renthub_session=abc123; theme=light"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn falls_back_to_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok-xyz"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("tok-xyz"));
    }

    #[test]
    fn missing_token_yields_none() {
        let headers = HeaderMap::new();
        assert!(extract_session_token(&headers).is_none());
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let value = build_clear_cookie();
        let s = value.to_str().unwrap();
        assert!(s.starts_with("renthub_session="));
        assert!(s.contains("Max-Age=0"));
    }
}
