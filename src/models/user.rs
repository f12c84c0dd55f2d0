//! User and profile models

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::helpers::{is_valid_email, non_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub bio: Option<String>,
    pub birth_info: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub institution: Option<String>,
    pub study_program: Option<String>,
    pub faculty: Option<String>,
    pub semester: Option<String>,
    pub gpa: Option<String>,
    pub interest_field: Option<String>,
    pub plans: Option<String>,
    pub career_motivator: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::User)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ScholarHubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ScholarHubError::validation(format!("Invalid role: {}", other))),
        }
    }
}

/// Profile view returned to the owning user, with absolute media URLs
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub bio: Option<String>,
    pub birth_info: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub institution: Option<String>,
    pub study_program: Option<String>,
    pub faculty: Option<String>,
    pub semester: Option<String>,
    pub gpa: Option<String>,
    pub interest_field: Option<String>,
    pub plans: Option<String>,
    pub career_motivator: Option<String>,
    pub profile_image_url: Option<String>,
    pub cover_image_url: Option<String>,
}

impl UserProfile {
    pub fn from_user(user: User, profile_image_url: Option<String>, cover_image_url: Option<String>) -> Self {
        Self {
            id: user.id,
            uuid: user.uuid,
            name: user.name,
            email: user.email,
            role: user.role,
            bio: user.bio,
            birth_info: user.birth_info,
            gender: user.gender,
            address: user.address,
            phone: user.phone,
            institution: user.institution,
            study_program: user.study_program,
            faculty: user.faculty,
            semester: user.semester,
            gpa: user.gpa,
            interest_field: user.interest_field,
            plans: user.plans,
            career_motivator: user.career_motivator,
            profile_image_url,
            cover_image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<()> {
        if non_blank(Some(&self.name)).is_none() {
            return Err(ScholarHubError::validation("Name is required"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ScholarHubError::validation("Invalid email format"));
        }
        if self.password.len() < 8 {
            return Err(ScholarHubError::validation("Password must be at least 8 characters"));
        }
        if let Some(confirm) = &self.confirm_password {
            if confirm != &self.password {
                return Err(ScholarHubError::validation("Password and confirmation do not match"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial profile update; only supplied fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub birth_info: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub institution: Option<String>,
    pub study_program: Option<String>,
    pub faculty: Option<String>,
    pub semester: Option<String>,
    pub gpa: Option<String>,
    pub interest_field: Option<String>,
    pub plans: Option<String>,
    pub career_motivator: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ScholarHubError::validation("Name cannot be empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_create_user_validation() {
        let mut request = CreateUserRequest {
            name: "Siti".to_string(),
            email: "siti@kampus.ac.id".to_string(),
            password: "rahasia123".to_string(),
            confirm_password: Some("rahasia123".to_string()),
        };
        assert!(request.validate().is_ok());

        request.confirm_password = Some("lain".to_string());
        assert!(request.validate().is_err());

        request.confirm_password = None;
        request.password = "short".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_profile_rejects_blank_name() {
        let request = UpdateProfileRequest {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
        assert!(UpdateProfileRequest::default().validate().is_ok());
    }
}
