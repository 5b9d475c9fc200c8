//! Session resolution and response headers
//!
//! The session user is named by the `x-taskboard-session` header. Credentials
//! are checked upstream; here the name only has to belong to a known user.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use taskboard_core::http::SESSION_HEADER;

use crate::http::{error_response, ErrorResponse};
use crate::store::User;
use crate::AppState;

/// The user the current request belongs to
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

impl FromRequestParts<Arc<AppState>> for SessionUser {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Not logged in"))?;

        let store = state.store.read().await;
        match store.user_by_name(username) {
            Some(user) => Ok(SessionUser(user.clone())),
            None => {
                tracing::debug!("Rejected session for unknown user {:?}", username);
                Err(error_response(StatusCode::UNAUTHORIZED, "Not logged in"))
            }
        }
    }
}

/// Mark every response as uncacheable
pub async fn no_cache(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    response
}
