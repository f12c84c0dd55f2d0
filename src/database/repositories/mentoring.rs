//! Mentoring session repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::mentoring::{
    MentoringSession, MentoringSessionView, MentoringParticipant, CreateMentoringRequest,
    UpdateMentoringRequest, PhotoChange,
};
use crate::utils::errors::Result;

const MENTORING_COLUMNS: &str = "id, uuid, title, description, mentor_name, mentor_expertise, mentor_photo, \
    participant_count, status, category, link, created_by, created_at, updated_at";

const VIEW_SELECT: &str = r#"
    SELECT m.id, m.uuid, m.title, m.description, m.mentor_name, m.mentor_expertise, m.mentor_photo,
           m.participant_count, m.status, m.category, m.link, m.created_by, m.created_at, m.updated_at,
           u.uuid AS creator_uuid, u.name AS creator_name, u.role AS creator_role
    FROM mentoring_sessions m
    LEFT JOIN users u ON u.id = m.created_by
"#;

#[derive(Clone)]
#[derive(Debug)]
pub struct MentoringRepository {
    pool: PgPool,
}

impl MentoringRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new mentoring session
    pub async fn create(&self, uuid: Uuid, request: CreateMentoringRequest) -> Result<MentoringSession> {
        let session = sqlx::query_as::<_, MentoringSession>(&format!(
            r#"
            INSERT INTO mentoring_sessions (uuid, title, description, mentor_name, mentor_expertise, mentor_photo,
                                            participant_count, status, category, link, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            MENTORING_COLUMNS
        ))
        .bind(uuid)
        .bind(request.title.trim())
        .bind(request.description)
        .bind(request.mentor_name.trim())
        .bind(request.mentor_expertise)
        .bind(request.mentor_photo)
        .bind(request.participant_count)
        .bind(request.status.as_str())
        .bind(request.category.trim())
        .bind(request.link)
        .bind(request.created_by)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Find mentoring session by public ID
    pub async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<MentoringSession>> {
        let session = sqlx::query_as::<_, MentoringSession>(&format!(
            "SELECT {} FROM mentoring_sessions WHERE uuid = $1",
            MENTORING_COLUMNS
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Find mentoring session with its creator by public ID
    pub async fn find_view_by_uuid(&self, uuid: Uuid) -> Result<Option<MentoringSessionView>> {
        let view = sqlx::query_as::<_, MentoringSessionView>(&format!("{} WHERE m.uuid = $1", VIEW_SELECT))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(view)
    }

    /// List all mentoring sessions, newest first
    pub async fn list(&self) -> Result<Vec<MentoringSessionView>> {
        let views = sqlx::query_as::<_, MentoringSessionView>(&format!(
            "{} ORDER BY m.created_at DESC, m.id DESC",
            VIEW_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(views)
    }

    /// Update mentoring session fields and, when requested, its photo reference
    pub async fn update(&self, id: i64, request: UpdateMentoringRequest, photo: &PhotoChange) -> Result<MentoringSession> {
        let (photo_changed, photo_name) = match photo {
            PhotoChange::Keep => (false, None),
            PhotoChange::Replace(name) => (true, Some(name.as_str())),
            PhotoChange::Remove => (true, None),
        };

        let session = sqlx::query_as::<_, MentoringSession>(&format!(
            r#"
            UPDATE mentoring_sessions
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                mentor_name = COALESCE($4, mentor_name),
                mentor_expertise = COALESCE($5, mentor_expertise),
                participant_count = COALESCE($6, participant_count),
                status = COALESCE($7, status),
                category = COALESCE($8, category),
                link = COALESCE($9, link),
                mentor_photo = CASE WHEN $10 THEN $11 ELSE mentor_photo END,
                updated_at = $12
            WHERE id = $1
            RETURNING {}
            "#,
            MENTORING_COLUMNS
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.mentor_name)
        .bind(request.mentor_expertise)
        .bind(request.participant_count)
        .bind(request.status.map(|status| status.as_str()))
        .bind(request.category)
        .bind(request.link)
        .bind(photo_changed)
        .bind(photo_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Delete mentoring session; participants go with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM mentoring_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Check whether an email already joined the session
    pub async fn is_participant(&self, mentoring_id: i64, email: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM mentoring_participants WHERE mentoring_id = $1 AND LOWER(email) = LOWER($2)"
        )
        .bind(mentoring_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Record a participant
    pub async fn add_participant(&self, mentoring_id: i64, user_id: i64, email: &str) -> Result<MentoringParticipant> {
        let participant = sqlx::query_as::<_, MentoringParticipant>(
            r#"
            INSERT INTO mentoring_participants (mentoring_id, user_id, email, joined_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, mentoring_id, user_id, email, joined_at
            "#
        )
        .bind(mentoring_id)
        .bind(user_id)
        .bind(email.to_lowercase())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }
}
