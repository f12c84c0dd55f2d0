//! Webinar registration endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;
use crate::handlers::webinars::find_webinar;
use crate::handlers::{parse_public_id, JsonBody, MessageResponse, QueryParams};
use crate::middleware::{AdminUser, MaybeUser};
use crate::models::webinar::{
    RegisterWebinarRequest, RegistrationListQuery, UpdateRegistrationRequest, WebinarRegistrationView,
};
use crate::services::filter::RegistrationFilter;
use crate::state::AppState;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::helpers::non_blank;
use crate::utils::logging::log_admin_action;

async fn find_registration(state: &AppState, raw_id: &str) -> Result<WebinarRegistrationView> {
    let uuid = parse_public_id(raw_id, "Registration")?;
    state
        .database
        .registrations
        .find_by_uuid(uuid)
        .await?
        .ok_or_else(|| ScholarHubError::not_found("Registration not found"))
}

/// POST /webinar-peserta
pub async fn register(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    JsonBody(request): JsonBody<RegisterWebinarRequest>,
) -> Result<impl IntoResponse> {
    let registration = request.validate()?;
    let webinar_uuid = registration.webinar_uuid;
    let created = state
        .services
        .registration_service
        .register_for_webinar(registration, user.map(|u| u.id))
        .await?;

    debug!(webinar = %webinar_uuid, registration = %created.uuid, "Webinar registration accepted");
    Ok((StatusCode::CREATED, MessageResponse::with_data("Webinar registration successful", created)))
}

/// GET /webinar-peserta
pub async fn list_registrations(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    QueryParams(query): QueryParams<RegistrationListQuery>,
) -> Result<Json<Vec<WebinarRegistrationView>>> {
    let status = RegistrationFilter::parse_status(query.status_pendaftaran.as_deref())?;
    let webinar_id = match non_blank(query.webinar_id.as_deref()) {
        Some(raw) => Some(find_webinar(&state, raw).await?.id),
        None => None,
    };

    let filter = RegistrationFilter { webinar_id, status };
    Ok(Json(state.database.registrations.list(&filter).await?))
}

/// GET /webinar/{id}/peserta
pub async fn list_for_webinar(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<RegistrationListQuery>,
) -> Result<Json<Vec<WebinarRegistrationView>>> {
    let status = RegistrationFilter::parse_status(query.status_pendaftaran.as_deref())?;
    let webinar = find_webinar(&state, &id).await?;

    let filter = RegistrationFilter {
        webinar_id: Some(webinar.id),
        status,
    };
    Ok(Json(state.database.registrations.list(&filter).await?))
}

/// GET /webinar-peserta/{id}
pub async fn get_registration(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<WebinarRegistrationView>> {
    Ok(Json(find_registration(&state, &id).await?))
}

/// PATCH /webinar-peserta/{id}
pub async fn update_registration(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateRegistrationRequest>,
) -> Result<impl IntoResponse> {
    let request = request.validate()?;
    let existing = find_registration(&state, &id).await?;
    let duplicate_msg = match &request.email {
        Some(email) => format!("Email {} is already registered", email),
        None => "Email is already registered".to_string(),
    };

    let updated = state
        .database
        .registrations
        .update(existing.registration.id, request)
        .await
        .map_err(|e| e.on_unique_violation(duplicate_msg))?;

    log_admin_action(admin.id, "update_registration", Some(&updated.uuid.to_string()));
    Ok(MessageResponse::with_data("Registration updated", updated))
}

/// DELETE /webinar-peserta/{id}
pub async fn delete_registration(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let existing = find_registration(&state, &id).await?;
    state.database.registrations.delete(existing.registration.id).await?;
    log_admin_action(admin.id, "delete_registration", Some(&existing.registration.uuid.to_string()));
    Ok(MessageResponse::message("Registration deleted"))
}
