//! Authentication middleware
//!
//! Extractors that resolve the acting user from the session cookie. The
//! lookup happens once per request; later extractors reuse the cached
//! [`RequestContext`].

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::{debug, warn};
use crate::config::SessionConfig;
use crate::models::user::User;
use crate::state::{AppState, RequestContext};
use crate::utils::errors::{ScholarHubError, Result};

/// Read a cookie value from the request headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(config: &SessionConfig, token: &str, max_age_seconds: i64) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        config.cookie_name, token, max_age_seconds
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that clears the session cookie
pub fn expired_session_cookie(config: &SessionConfig) -> String {
    session_cookie(config, "", 0)
}

/// Resolve the request context, reusing a cached one
pub async fn resolve_context(parts: &mut Parts, state: &AppState) -> Result<RequestContext> {
    if let Some(context) = parts.extensions.get::<RequestContext>() {
        return Ok(context.clone());
    }

    let context = match read_cookie(&parts.headers, &state.settings.session.cookie_name) {
        Some(token) => match state.services.auth_service.resolve(&token).await? {
            Some(user) => {
                debug!(user_id = user.id, "Session resolved");
                RequestContext::with_user(user, token)
            }
            None => {
                warn!("Request presented an unknown or expired session");
                RequestContext {
                    user: None,
                    token: Some(token),
                }
            }
        },
        None => RequestContext::anonymous(),
    };

    parts.extensions.insert(context.clone());
    Ok(context)
}

/// Any logged-in user; 401 otherwise
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ScholarHubError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let context = resolve_context(parts, state).await?;
        context.require_user().cloned().map(CurrentUser)
    }
}

/// A logged-in admin; 401 without a session, 403 for other roles
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ScholarHubError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let context = resolve_context(parts, state).await?;
        match context.require_admin() {
            Ok(user) => Ok(AdminUser(user.clone())),
            Err(e) => {
                if let Some(user) = &context.user {
                    warn!(user_id = user.id, path = %parts.uri.path(), "Non-admin attempted admin operation");
                }
                Err(e)
            }
        }
    }
}

/// The session user when there is one; never rejects for a missing session
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ScholarHubError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let context = resolve_context(parts, state).await?;
        Ok(MaybeUser(context.user))
    }
}

/// The raw session token from the cookie, without looking it up
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = ScholarHubError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        Ok(SessionToken(read_cookie(&parts.headers, &state.settings.session.cookie_name)))
    }
}
