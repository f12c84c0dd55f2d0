//! Mentoring session service
//!
//! Admin CRUD over mentoring sessions, keeping the mentor photo on disk in
//! step with the row that references it.

use tracing::info;
use uuid::Uuid;
use crate::database::repositories::MentoringRepository;
use crate::models::mentoring::{
    CreateMentoringRequest, MentoringSession, MentoringSessionView, PhotoChange, UpdateMentoringRequest,
};
use crate::services::media::{MediaKind, MediaStore, Upload};
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::logging::log_admin_action;

/// Photo edit requested alongside an update
#[derive(Debug, Clone)]
pub enum PhotoEdit {
    Keep,
    Upload(Upload),
    Remove,
}

#[derive(Clone, Debug)]
pub struct MentoringService {
    repository: MentoringRepository,
    media: MediaStore,
}

impl MentoringService {
    pub fn new(repository: MentoringRepository, media: MediaStore) -> Self {
        Self { repository, media }
    }

    pub async fn list(&self) -> Result<Vec<MentoringSessionView>> {
        self.repository.list().await
    }

    pub async fn get(&self, uuid: Uuid) -> Result<MentoringSessionView> {
        self.repository
            .find_view_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScholarHubError::not_found("Mentoring session not found"))
    }

    async fn find(&self, uuid: Uuid) -> Result<MentoringSession> {
        self.repository
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ScholarHubError::not_found("Mentoring session not found"))
    }

    /// Create a session; an uploaded photo is stored first and removed again
    /// if the insert fails
    pub async fn create(&self, admin_id: i64, mut request: CreateMentoringRequest, photo: Option<Upload>) -> Result<MentoringSession> {
        request.validate()?;
        request.created_by = Some(admin_id);

        let uuid = Uuid::new_v4();

        let session = match photo {
            Some(upload) => {
                let repository = self.repository.clone();
                let (_, session) = self
                    .media
                    .replace(MediaKind::MentorPhoto, uuid, None, &upload, |name| async move {
                        request.mentor_photo = Some(name);
                        repository.create(uuid, request).await
                    })
                    .await?;
                session
            }
            None => self.repository.create(uuid, request).await?,
        };

        log_admin_action(admin_id, "create_mentoring", Some(&session.uuid.to_string()));
        Ok(session)
    }

    /// Partial update, optionally replacing or removing the mentor photo
    pub async fn update(&self, admin_id: i64, uuid: Uuid, request: UpdateMentoringRequest, photo: PhotoEdit) -> Result<MentoringSession> {
        request.validate()?;
        let existing = self.find(uuid).await?;
        let id = existing.id;
        let current = existing.mentor_photo.as_deref();
        let repository = self.repository.clone();

        let session = match photo {
            PhotoEdit::Keep => repository.update(id, request, &PhotoChange::Keep).await?,
            PhotoEdit::Upload(upload) => {
                let (_, session) = self
                    .media
                    .replace(MediaKind::MentorPhoto, uuid, current, &upload, |name| async move {
                        repository.update(id, request, &PhotoChange::Replace(name)).await
                    })
                    .await?;
                session
            }
            PhotoEdit::Remove => {
                self.media
                    .delete(MediaKind::MentorPhoto, current, || async move {
                        repository.update(id, request, &PhotoChange::Remove).await
                    })
                    .await?
            }
        };

        log_admin_action(admin_id, "update_mentoring", Some(&uuid.to_string()));
        Ok(session)
    }

    /// Delete a session and its photo
    pub async fn delete(&self, admin_id: i64, uuid: Uuid) -> Result<()> {
        let existing = self.find(uuid).await?;
        let id = existing.id;
        let repository = self.repository.clone();

        self.media
            .delete(MediaKind::MentorPhoto, existing.mentor_photo.as_deref(), || async move {
                repository.delete(id).await
            })
            .await?;

        info!(mentoring_id = id, "Mentoring session deleted");
        log_admin_action(admin_id, "delete_mentoring", Some(&uuid.to_string()));
        Ok(())
    }
}
