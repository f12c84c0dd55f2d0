//! Webinar endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use crate::handlers::{parse_public_id, JsonBody, MessageResponse};
use crate::middleware::AdminUser;
use crate::models::webinar::{CreateWebinarRequest, UpdateWebinarRequest, Webinar};
use crate::state::AppState;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::logging::log_admin_action;

pub(crate) async fn find_webinar(state: &AppState, raw_id: &str) -> Result<Webinar> {
    let uuid = parse_public_id(raw_id, "Webinar")?;
    state
        .database
        .webinars
        .find_by_uuid(uuid)
        .await?
        .ok_or_else(|| ScholarHubError::not_found("Webinar not found"))
}

/// GET /webinar
pub async fn list_webinars(State(state): State<AppState>) -> Result<Json<Vec<Webinar>>> {
    Ok(Json(state.database.webinars.list().await?))
}

/// GET /webinar/{id}
pub async fn get_webinar(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Webinar>> {
    Ok(Json(find_webinar(&state, &id).await?))
}

/// POST /webinar
pub async fn create_webinar(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(request): JsonBody<CreateWebinarRequest>,
) -> Result<impl IntoResponse> {
    request.validate()?;
    let webinar = state.database.webinars.create(request).await?;
    log_admin_action(admin.id, "create_webinar", Some(&webinar.uuid.to_string()));
    Ok((StatusCode::CREATED, MessageResponse::with_data("Webinar created", webinar)))
}

/// PATCH /webinar/{id}
pub async fn update_webinar(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateWebinarRequest>,
) -> Result<impl IntoResponse> {
    let existing = find_webinar(&state, &id).await?;
    let webinar = state.database.webinars.update(existing.id, request).await?;
    log_admin_action(admin.id, "update_webinar", Some(&webinar.uuid.to_string()));
    Ok(MessageResponse::with_data("Webinar updated", webinar))
}

/// DELETE /webinar/{id}
pub async fn delete_webinar(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let existing = find_webinar(&state, &id).await?;
    state.database.webinars.delete(existing.id).await?;
    log_admin_action(admin.id, "delete_webinar", Some(&existing.uuid.to_string()));
    Ok(MessageResponse::message("Webinar deleted"))
}
