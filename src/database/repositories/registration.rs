//! Webinar registration repository implementation

use sqlx::{PgPool, Postgres, QueryBuilder};
use chrono::Utc;
use uuid::Uuid;
use crate::models::webinar::{
    WebinarRegistration, WebinarRegistrationView, NewRegistration, RegistrationStatus, UpdateRegistrationRequest,
};
use crate::services::filter::RegistrationFilter;
use crate::utils::errors::Result;

const REGISTRATION_COLUMNS: &str = "id, uuid, webinar_id, user_id, name, education_level, institution, major, \
    email, phone, reason, status, created_at, updated_at";

const VIEW_SELECT: &str = r#"
    SELECT r.id, r.uuid, r.webinar_id, r.user_id, r.name, r.education_level, r.institution, r.major,
           r.email, r.phone, r.reason, r.status, r.created_at, r.updated_at,
           w.uuid AS webinar_uuid, w.title AS webinar_title, w.event_date AS webinar_date,
           w.event_time AS webinar_time, w.organizer AS webinar_organizer
    FROM webinar_registrations r
    JOIN webinars w ON w.id = r.webinar_id
"#;

#[derive(Clone)]
#[derive(Debug)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration; a duplicate (webinar, email) surfaces as a unique violation
    pub async fn create(
        &self,
        webinar_id: i64,
        user_id: Option<i64>,
        registration: &NewRegistration,
        status: RegistrationStatus,
    ) -> Result<WebinarRegistration> {
        let created = sqlx::query_as::<_, WebinarRegistration>(&format!(
            r#"
            INSERT INTO webinar_registrations (uuid, webinar_id, user_id, name, education_level, institution, major,
                                               email, phone, reason, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            REGISTRATION_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(webinar_id)
        .bind(user_id)
        .bind(&registration.name)
        .bind(&registration.education_level)
        .bind(&registration.institution)
        .bind(&registration.major)
        .bind(&registration.email)
        .bind(&registration.phone)
        .bind(&registration.reason)
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Check whether an email is already registered for a webinar
    pub async fn is_registered(&self, webinar_id: i64, email: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM webinar_registrations WHERE webinar_id = $1 AND LOWER(email) = LOWER($2)"
        )
        .bind(webinar_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Find registration with its webinar by public ID
    pub async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<WebinarRegistrationView>> {
        let view = sqlx::query_as::<_, WebinarRegistrationView>(&format!("{} WHERE r.uuid = $1", VIEW_SELECT))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(view)
    }

    /// List registrations matching the filter, newest first
    pub async fn list(&self, filter: &RegistrationFilter) -> Result<Vec<WebinarRegistrationView>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("{} WHERE 1=1", VIEW_SELECT));
        filter.push_predicates(&mut builder);
        builder.push(" ORDER BY r.created_at DESC, r.id DESC");

        let views = builder
            .build_query_as::<WebinarRegistrationView>()
            .fetch_all(&self.pool)
            .await?;

        Ok(views)
    }

    /// Update registration
    pub async fn update(&self, id: i64, request: UpdateRegistrationRequest) -> Result<WebinarRegistration> {
        let updated = sqlx::query_as::<_, WebinarRegistration>(&format!(
            r#"
            UPDATE webinar_registrations
            SET name = COALESCE($2, name),
                education_level = COALESCE($3, education_level),
                institution = COALESCE($4, institution),
                major = COALESCE($5, major),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone),
                reason = COALESCE($8, reason),
                status = COALESCE($9, status),
                updated_at = $10
            WHERE id = $1
            RETURNING {}
            "#,
            REGISTRATION_COLUMNS
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.education_level.map(|level| level.trim().to_string()))
        .bind(request.institution)
        .bind(request.major)
        .bind(request.email)
        .bind(request.phone.map(|phone| phone.trim().to_string()))
        .bind(request.reason)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete registration
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM webinar_registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
