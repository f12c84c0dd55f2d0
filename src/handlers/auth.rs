//! Account and session endpoints

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use crate::handlers::{JsonBody, MessageResponse};
use crate::middleware::auth::{expired_session_cookie, session_cookie, CurrentUser, SessionToken};
use crate::models::user::{CreateUserRequest, LoginRequest, UserProfile};
use crate::state::AppState;
use crate::utils::errors::Result;

/// POST /users
pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    let user = state.services.auth_service.sign_up(request).await?;
    let profile = state.services.user_service.to_profile(user);
    Ok((StatusCode::CREATED, MessageResponse::with_data("Registration successful", profile)))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Response> {
    let issued = state.services.auth_service.login(request).await?;
    let cookie = session_cookie(&state.settings.session, &issued.token, issued.max_age_seconds);
    let profile = state.services.user_service.to_profile(issued.user);

    Ok((
        [(SET_COOKIE, cookie)],
        MessageResponse::with_data("Login successful", profile),
    )
        .into_response())
}

/// DELETE /logout
pub async fn logout(State(state): State<AppState>, SessionToken(token): SessionToken) -> Result<Response> {
    if let Some(token) = token {
        state.services.auth_service.logout(&token).await?;
    }

    Ok((
        [(SET_COOKIE, expired_session_cookie(&state.settings.session))],
        MessageResponse::message("You have been logged out"),
    )
        .into_response())
}

/// GET /me
pub async fn me(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(state.services.user_service.to_profile(user))
}
