//! Mentoring session model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::helpers::non_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MentoringSession {
    #[serde(skip_serializing)]
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub mentor_name: String,
    pub mentor_expertise: String,
    pub mentor_photo: Option<String>,
    pub participant_count: i32,
    pub status: String,
    pub category: String,
    pub link: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MentoringSession {
    pub fn status(&self) -> Result<MentoringStatus> {
        self.status.parse()
    }
}

/// Mentoring session joined with its creator for listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MentoringSessionView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub session: MentoringSession,
    pub creator_uuid: Option<Uuid>,
    pub creator_name: Option<String>,
    pub creator_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MentoringParticipant {
    pub id: i64,
    pub mentoring_id: i64,
    pub user_id: i64,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentoringStatus {
    Available,
    Full,
}

impl MentoringStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentoringStatus::Available => "available",
            MentoringStatus::Full => "full",
        }
    }

    pub fn accepts_participants(&self) -> bool {
        matches!(self, MentoringStatus::Available)
    }
}

impl fmt::Display for MentoringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MentoringStatus {
    type Err = ScholarHubError;

    /// Accepts the canonical values and the legacy `Tersedia`/`Penuh` labels
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" | "tersedia" => Ok(MentoringStatus::Available),
            "full" | "penuh" => Ok(MentoringStatus::Full),
            other => Err(ScholarHubError::validation(format!("Invalid mentoring status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMentoringRequest {
    pub title: String,
    pub description: String,
    pub mentor_name: String,
    pub mentor_expertise: String,
    pub participant_count: i32,
    pub status: MentoringStatus,
    pub category: String,
    pub link: Option<String>,
    pub mentor_photo: Option<String>,
    pub created_by: Option<i64>,
}

impl CreateMentoringRequest {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("mentor_name", &self.mentor_name),
            ("mentor_expertise", &self.mentor_expertise),
            ("category", &self.category),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| non_blank(Some(value.as_str())).is_none())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ScholarHubError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        if self.participant_count < 0 {
            return Err(ScholarHubError::validation("Participant count cannot be negative"));
        }

        Ok(())
    }
}

/// Partial update; `mentor_photo` is managed by the media lifecycle, not the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMentoringRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub mentor_name: Option<String>,
    pub mentor_expertise: Option<String>,
    pub participant_count: Option<i32>,
    pub status: Option<MentoringStatus>,
    pub category: Option<String>,
    pub link: Option<String>,
}

impl UpdateMentoringRequest {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.participant_count, Some(count) if count < 0) {
            return Err(ScholarHubError::validation("Participant count cannot be negative"));
        }
        Ok(())
    }
}

/// Where the stored mentor photo should end up after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoChange {
    Keep,
    Replace(String),
    Remove,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinMentoringResponse {
    pub msg: String,
    pub mentoring: MentoringSession,
}
