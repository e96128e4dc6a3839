use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::jwt::validate_session_token;

/// Permissive session middleware.
///
/// On each request:
/// 1. Validates the session cookie (or Bearer header) into request extensions
/// 2. Inserts a `CookieSlot` so server functions can schedule cookie changes
/// 3. After the handler runs, applies any pending cookie action to the response
///
/// Does NOT reject unauthenticated requests; downstream handlers decide
/// authorization themselves.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    if let Some(token) = cookies::extract_session_token(req.headers()) {
        if let Ok(claims) = validate_session_token(&token) {
            req.extensions_mut().insert(claims);
        }
    }

    let slot = CookieSlot::default();
    req.extensions_mut().insert(slot.clone());

    let mut response = next.run(req).await;

    if let Some(action) = slot.0.lock().unwrap().take() {
        match action {
            PendingCookieAction::Set { token } => {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, cookies::build_session_cookie(&token));
            }
            PendingCookieAction::Clear => {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, cookies::build_clear_cookie());
            }
        }
    }

    response
}
