//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::user::{User, UpdateProfileRequest};
use crate::utils::errors::Result;

const USER_COLUMNS: &str = "id, uuid, name, email, password_hash, role, bio, birth_info, gender, address, phone, \
    institution, study_program, faculty, semester, gpa, interest_field, plans, career_motivator, \
    profile_image, cover_image, created_at, updated_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with an already hashed password
    pub async fn create(&self, name: &str, email: &str, password_hash: &str, role: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (uuid, name, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find user by email, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update profile fields; absent fields keep their value
    pub async fn update_profile(&self, id: i64, request: UpdateProfileRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                birth_info = COALESCE($4, birth_info),
                gender = COALESCE($5, gender),
                address = COALESCE($6, address),
                phone = COALESCE($7, phone),
                institution = COALESCE($8, institution),
                study_program = COALESCE($9, study_program),
                faculty = COALESCE($10, faculty),
                semester = COALESCE($11, semester),
                gpa = COALESCE($12, gpa),
                interest_field = COALESCE($13, interest_field),
                plans = COALESCE($14, plans),
                career_motivator = COALESCE($15, career_motivator),
                updated_at = $16
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(request.name.map(|name| name.trim().to_string()))
        .bind(request.bio)
        .bind(request.birth_info)
        .bind(request.gender)
        .bind(request.address)
        .bind(request.phone)
        .bind(request.institution)
        .bind(request.study_program)
        .bind(request.faculty)
        .bind(request.semester)
        .bind(request.gpa)
        .bind(request.interest_field)
        .bind(request.plans)
        .bind(request.career_motivator)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Point the profile photo at a stored file, or clear it
    pub async fn set_profile_image(&self, id: i64, file_name: Option<&str>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET profile_image = $2, updated_at = $3 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(file_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Point the cover photo at a stored file, or clear it
    pub async fn set_cover_image(&self, id: i64, file_name: Option<&str>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET cover_image = $2, updated_at = $3 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(file_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
