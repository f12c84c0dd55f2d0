//! Scholarship endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;
use crate::handlers::{parse_public_id, JsonBody, MessageResponse, QueryParams};
use crate::middleware::AdminUser;
use crate::models::scholarship::{CreateScholarshipRequest, Scholarship, UpdateScholarshipRequest};
use crate::services::filter::{ScholarshipFilter, ScholarshipQuery};
use crate::state::AppState;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::logging::log_admin_action;

async fn find_scholarship(state: &AppState, raw_id: &str) -> Result<Scholarship> {
    let uuid = parse_public_id(raw_id, "Scholarship")?;
    state
        .database
        .scholarships
        .find_by_uuid(uuid)
        .await?
        .ok_or_else(|| ScholarHubError::not_found("Scholarship not found"))
}

/// GET /beasiswa
pub async fn list_scholarships(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ScholarshipQuery>,
) -> Result<Json<Vec<Scholarship>>> {
    let filter = ScholarshipFilter::from_query(&query)?;
    let scholarships = state.database.scholarships.list(&filter).await?;
    debug!(count = scholarships.len(), filtered = !filter.is_empty(), "Scholarships listed");
    Ok(Json(scholarships))
}

/// GET /beasiswa/{id}
pub async fn get_scholarship(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Scholarship>> {
    Ok(Json(find_scholarship(&state, &id).await?))
}

/// POST /beasiswa
pub async fn create_scholarship(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(request): JsonBody<CreateScholarshipRequest>,
) -> Result<impl IntoResponse> {
    request.validate()?;
    let scholarship = state.database.scholarships.create(request).await?;
    log_admin_action(admin.id, "create_scholarship", Some(&scholarship.uuid.to_string()));
    Ok((StatusCode::CREATED, MessageResponse::with_data("Scholarship created", scholarship)))
}

/// PATCH /beasiswa/{id}
pub async fn update_scholarship(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateScholarshipRequest>,
) -> Result<impl IntoResponse> {
    request.validate()?;
    let existing = find_scholarship(&state, &id).await?;
    let scholarship = state.database.scholarships.update(existing.id, request).await?;
    log_admin_action(admin.id, "update_scholarship", Some(&scholarship.uuid.to_string()));
    Ok(MessageResponse::with_data("Scholarship updated", scholarship))
}

/// DELETE /beasiswa/{id}
pub async fn delete_scholarship(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let existing = find_scholarship(&state, &id).await?;
    state.database.scholarships.delete(existing.id).await?;
    log_admin_action(admin.id, "delete_scholarship", Some(&existing.uuid.to_string()));
    Ok(MessageResponse::message("Scholarship deleted"))
}
