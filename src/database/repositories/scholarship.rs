//! Scholarship repository implementation

use sqlx::{PgPool, Postgres, QueryBuilder};
use chrono::Utc;
use uuid::Uuid;
use crate::models::scholarship::{Scholarship, CreateScholarshipRequest, UpdateScholarshipRequest};
use crate::services::filter::ScholarshipFilter;
use crate::utils::errors::Result;

const SCHOLARSHIP_COLUMNS: &str = "id, uuid, title, description, detail, category, level, location, deadline, \
    organizer, link, image, created_at, updated_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct ScholarshipRepository {
    pool: PgPool,
}

impl ScholarshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new scholarship posting
    pub async fn create(&self, request: CreateScholarshipRequest) -> Result<Scholarship> {
        let scholarship = sqlx::query_as::<_, Scholarship>(&format!(
            r#"
            INSERT INTO scholarships (uuid, title, description, detail, category, level, location, deadline, organizer, link, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            SCHOLARSHIP_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.title.trim())
        .bind(request.description)
        .bind(request.detail)
        .bind(request.category.trim())
        .bind(request.level.trim())
        .bind(request.location.trim())
        .bind(request.deadline)
        .bind(request.organizer)
        .bind(request.link)
        .bind(request.image)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(scholarship)
    }

    /// Find scholarship by public ID
    pub async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Scholarship>> {
        let scholarship = sqlx::query_as::<_, Scholarship>(&format!(
            "SELECT {} FROM scholarships WHERE uuid = $1",
            SCHOLARSHIP_COLUMNS
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(scholarship)
    }

    /// List every posting matching the filter, earliest deadline first
    pub async fn list(&self, filter: &ScholarshipFilter) -> Result<Vec<Scholarship>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM scholarships WHERE 1=1",
            SCHOLARSHIP_COLUMNS
        ));
        filter.push_predicates(&mut builder);
        builder.push(" ORDER BY deadline ASC, id ASC");

        let scholarships = builder
            .build_query_as::<Scholarship>()
            .fetch_all(&self.pool)
            .await?;

        Ok(scholarships)
    }

    /// Update scholarship
    pub async fn update(&self, id: i64, request: UpdateScholarshipRequest) -> Result<Scholarship> {
        let scholarship = sqlx::query_as::<_, Scholarship>(&format!(
            r#"
            UPDATE scholarships
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                detail = COALESCE($4, detail),
                category = COALESCE($5, category),
                level = COALESCE($6, level),
                location = COALESCE($7, location),
                deadline = COALESCE($8, deadline),
                organizer = COALESCE($9, organizer),
                link = COALESCE($10, link),
                image = COALESCE($11, image),
                updated_at = $12
            WHERE id = $1
            RETURNING {}
            "#,
            SCHOLARSHIP_COLUMNS
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.detail)
        .bind(request.category)
        .bind(request.level)
        .bind(request.location)
        .bind(request.deadline)
        .bind(request.organizer)
        .bind(request.link)
        .bind(request.image)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(scholarship)
    }

    /// Delete scholarship
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM scholarships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
