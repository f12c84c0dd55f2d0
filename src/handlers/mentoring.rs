//! Mentoring endpoints
//!
//! Admin create and update take multipart forms so a mentor photo can ride
//! along with the text fields.

use std::collections::HashMap;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use crate::handlers::{parse_public_id, MessageResponse};
use crate::middleware::{AdminUser, CurrentUser};
use crate::models::mentoring::{
    CreateMentoringRequest, JoinMentoringResponse, MentoringSessionView, MentoringStatus, UpdateMentoringRequest,
};
use crate::services::media::{non_empty_upload, Upload};
use crate::services::mentoring::PhotoEdit;
use crate::state::AppState;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::helpers::non_blank;

/// Legacy form field names and the names they map to
const FIELD_ALIASES: [(&str, &str); 8] = [
    ("judul", "title"),
    ("deskripsi", "description"),
    ("namaMentor", "mentor_name"),
    ("keahlianMentor", "mentor_expertise"),
    ("jumlahPeserta", "participant_count"),
    ("statusMentoring", "status"),
    ("kategoriMentoring", "category"),
    ("fotoMentor", "photo"),
];

fn canonical_field(name: &str) -> &str {
    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Text fields and optional photo from a mentoring form
#[derive(Debug, Default)]
pub struct MentoringForm {
    fields: HashMap<String, String>,
    photo: Option<Upload>,
}

impl MentoringForm {
    /// Drain a multipart body into a form
    pub async fn read(multipart: &mut Multipart) -> Result<Self> {
        let mut form = MentoringForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if let Some(upload) = non_empty_upload(file_name, bytes.to_vec()) {
                        form.photo = Some(upload);
                    }
                }
                None => {
                    let value = field.text().await?;
                    form.insert_text(&name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn insert_text(&mut self, name: &str, value: String) {
        self.fields.insert(canonical_field(name).to_string(), value);
    }

    pub fn set_photo(&mut self, upload: Upload) {
        self.photo = Some(upload);
    }

    fn text(&self, key: &str) -> Option<String> {
        non_blank(self.fields.get(key).map(String::as_str)).map(str::to_string)
    }

    fn participant_count(&self) -> Result<Option<i32>> {
        self.text("participant_count")
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| ScholarHubError::validation("Participant count must be a whole number"))
            })
            .transpose()
    }

    fn status(&self) -> Result<Option<MentoringStatus>> {
        self.text("status").map(|raw| raw.parse()).transpose()
    }

    /// Build a create request; the photo is returned separately
    pub fn into_create(self) -> Result<(CreateMentoringRequest, Option<Upload>)> {
        let request = CreateMentoringRequest {
            title: self.text("title").unwrap_or_default(),
            description: self.text("description").unwrap_or_default(),
            mentor_name: self.text("mentor_name").unwrap_or_default(),
            mentor_expertise: self.text("mentor_expertise").unwrap_or_default(),
            participant_count: self.participant_count()?.unwrap_or(0),
            status: self.status()?.unwrap_or(MentoringStatus::Available),
            category: self.text("category").unwrap_or_default(),
            link: self.text("link"),
            mentor_photo: None,
            created_by: None,
        };
        request.validate()?;
        Ok((request, self.photo))
    }

    /// Build an update request and the photo edit it asks for
    pub fn into_update(self) -> Result<(UpdateMentoringRequest, PhotoEdit)> {
        let request = UpdateMentoringRequest {
            title: self.text("title"),
            description: self.text("description"),
            mentor_name: self.text("mentor_name"),
            mentor_expertise: self.text("mentor_expertise"),
            participant_count: self.participant_count()?,
            status: self.status()?,
            category: self.text("category"),
            link: self.text("link"),
        };
        request.validate()?;

        let remove = matches!(self.text("remove_photo").as_deref(), Some("true") | Some("1"));
        let edit = match (self.photo, remove) {
            (Some(upload), _) => PhotoEdit::Upload(upload),
            (None, true) => PhotoEdit::Remove,
            (None, false) => PhotoEdit::Keep,
        };
        Ok((request, edit))
    }
}

/// GET /mentoring
pub async fn list_mentoring(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<MentoringSessionView>>> {
    Ok(Json(state.services.mentoring_service.list().await?))
}

/// GET /mentoring/{id}
pub async fn get_mentoring(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MentoringSessionView>> {
    let uuid = parse_public_id(&id, "Mentoring session")?;
    Ok(Json(state.services.mentoring_service.get(uuid).await?))
}

/// POST /mentoring
pub async fn create_mentoring(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let (request, photo) = MentoringForm::read(&mut multipart).await?.into_create()?;
    let session = state.services.mentoring_service.create(admin.id, request, photo).await?;
    Ok((StatusCode::CREATED, MessageResponse::with_data("Mentoring session created", session)))
}

/// PATCH /mentoring/{id}
pub async fn update_mentoring(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let uuid = parse_public_id(&id, "Mentoring session")?;
    let (request, photo) = MentoringForm::read(&mut multipart).await?.into_update()?;
    let session = state.services.mentoring_service.update(admin.id, uuid, request, photo).await?;
    Ok(MessageResponse::with_data("Mentoring session updated", session))
}

/// DELETE /mentoring/{id}
pub async fn delete_mentoring(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let uuid = parse_public_id(&id, "Mentoring session")?;
    state.services.mentoring_service.delete(admin.id, uuid).await?;
    Ok(MessageResponse::message("Mentoring session deleted"))
}

/// POST /mentoring/{id}/join
pub async fn join_mentoring(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<JoinMentoringResponse>> {
    let uuid = parse_public_id(&id, "Mentoring session")?;
    let (session, _participant) = state.services.registration_service.join_mentoring(uuid, &user).await?;

    let msg = match &session.link {
        Some(link) => format!(
            "You have joined \"{}\" with {}. Join through: {}",
            session.title, session.mentor_name, link
        ),
        None => format!("You have joined \"{}\" with {}", session.title, session.mentor_name),
    };
    Ok(Json(JoinMentoringResponse { msg, mentoring: session }))
}
