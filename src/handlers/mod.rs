//! HTTP handlers module
//!
//! This module contains the JSON endpoints, organized by resource, and the
//! router that wires them together.

pub mod auth;
pub mod health;
pub mod mentoring;
pub mod profile;
pub mod registrations;
pub mod scholarships;
pub mod webinars;

use axum::extract::{DefaultBodyLimit, FromRequest, FromRequestParts, Json, Query, Request};
use axum::http::request::Parts;
use axum::routing::{get, post};
use axum::{middleware, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use uuid::Uuid;
use crate::middleware::log_requests;
use crate::state::AppState;
use crate::utils::errors::{ScholarHubError, Result};

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    // Leave room above the upload limit so oversized files reach validation
    let body_limit = state.settings.media.max_upload_bytes * 2 + 1024 * 1024;

    Router::new()
        .route("/health", get(health::health))
        .route("/users", post(auth::sign_up))
        .route("/login", post(auth::login))
        .route("/logout", axum::routing::delete(auth::logout))
        .route("/me", get(auth::me))
        .route(
            "/beasiswa",
            get(scholarships::list_scholarships).post(scholarships::create_scholarship),
        )
        .route(
            "/beasiswa/{id}",
            get(scholarships::get_scholarship)
                .patch(scholarships::update_scholarship)
                .delete(scholarships::delete_scholarship),
        )
        .route(
            "/mentoring",
            get(mentoring::list_mentoring).post(mentoring::create_mentoring),
        )
        .route(
            "/mentoring/{id}",
            get(mentoring::get_mentoring)
                .patch(mentoring::update_mentoring)
                .delete(mentoring::delete_mentoring),
        )
        .route("/mentoring/{id}/join", post(mentoring::join_mentoring))
        .route("/webinar", get(webinars::list_webinars).post(webinars::create_webinar))
        .route(
            "/webinar/{id}",
            get(webinars::get_webinar)
                .patch(webinars::update_webinar)
                .delete(webinars::delete_webinar),
        )
        .route("/webinar/{id}/peserta", get(registrations::list_for_webinar))
        .route(
            "/webinar-peserta",
            get(registrations::list_registrations).post(registrations::register),
        )
        .route(
            "/webinar-peserta/{id}",
            get(registrations::get_registration)
                .patch(registrations::update_registration)
                .delete(registrations::delete_registration),
        )
        .route("/profile", get(profile::get_profile).patch(profile::update_profile))
        .route(
            "/profile/photo",
            post(profile::upload_photo).delete(profile::delete_photo),
        )
        .route(
            "/profile/cover",
            post(profile::upload_cover).delete(profile::delete_cover),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(log_requests))
        .layer(
            // Span only; the request log line comes from `log_requests`
            TraceLayer::new_for_http()
                .on_request(())
                .on_response(())
                .on_failure(()),
        )
        .with_state(state)
}

/// JSON body whose rejections are reported as validation errors
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ScholarHubError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ScholarHubError::validation(rejection.body_text())),
        }
    }
}

/// Query string whose rejections are reported as validation errors
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ScholarHubError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(ScholarHubError::validation(rejection.body_text())),
        }
    }
}

/// Parse a public identifier from the path; anything unparseable cannot exist
pub fn parse_public_id(raw: &str, entity: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ScholarHubError::not_found(format!("{} not found", entity)))
}

/// Confirmation body for mutating endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> MessageResponse<T> {
    pub fn with_data(msg: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            msg: msg.into(),
            data: Some(data),
        })
    }
}

impl MessageResponse<()> {
    pub fn message(msg: impl Into<String>) -> Json<Self> {
        Json(Self {
            msg: msg.into(),
            data: None,
        })
    }
}
