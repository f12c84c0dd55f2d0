//! Webinar repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::webinar::{Webinar, WebinarStatus, CreateWebinarRequest, UpdateWebinarRequest};
use crate::utils::errors::Result;

const WEBINAR_COLUMNS: &str = "id, uuid, title, description, speaker, organizer, event_date, event_time, status, \
    link, created_at, updated_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct WebinarRepository {
    pool: PgPool,
}

impl WebinarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new webinar
    pub async fn create(&self, request: CreateWebinarRequest) -> Result<Webinar> {
        let webinar = sqlx::query_as::<_, Webinar>(&format!(
            r#"
            INSERT INTO webinars (uuid, title, description, speaker, organizer, event_date, event_time, status, link, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            WEBINAR_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.title.trim())
        .bind(request.description)
        .bind(request.speaker)
        .bind(request.organizer.trim())
        .bind(request.event_date)
        .bind(request.event_time)
        .bind(request.status.unwrap_or(WebinarStatus::Upcoming).as_str())
        .bind(request.link)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(webinar)
    }

    /// Find webinar by public ID
    pub async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Webinar>> {
        let webinar = sqlx::query_as::<_, Webinar>(&format!("SELECT {} FROM webinars WHERE uuid = $1", WEBINAR_COLUMNS))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(webinar)
    }

    /// List webinars by event date
    pub async fn list(&self) -> Result<Vec<Webinar>> {
        let webinars = sqlx::query_as::<_, Webinar>(&format!(
            "SELECT {} FROM webinars ORDER BY event_date ASC, id ASC",
            WEBINAR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(webinars)
    }

    /// Update webinar
    pub async fn update(&self, id: i64, request: UpdateWebinarRequest) -> Result<Webinar> {
        let webinar = sqlx::query_as::<_, Webinar>(&format!(
            r#"
            UPDATE webinars
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                speaker = COALESCE($4, speaker),
                organizer = COALESCE($5, organizer),
                event_date = COALESCE($6, event_date),
                event_time = COALESCE($7, event_time),
                status = COALESCE($8, status),
                link = COALESCE($9, link),
                updated_at = $10
            WHERE id = $1
            RETURNING {}
            "#,
            WEBINAR_COLUMNS
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.speaker)
        .bind(request.organizer)
        .bind(request.event_date)
        .bind(request.event_time)
        .bind(request.status.map(|status| status.as_str()))
        .bind(request.link)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(webinar)
    }

    /// Delete webinar; registrations go with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM webinars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
