//! Scholarship posting model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::helpers::non_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Scholarship {
    #[serde(skip_serializing)]
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub detail: String,
    pub category: String,
    pub level: String,
    pub location: String,
    pub deadline: NaiveDate,
    pub organizer: String,
    pub link: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScholarshipRequest {
    pub title: String,
    pub description: String,
    pub detail: String,
    pub category: String,
    pub level: String,
    pub location: String,
    pub deadline: NaiveDate,
    pub organizer: String,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl CreateScholarshipRequest {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("detail", &self.detail),
            ("category", &self.category),
            ("level", &self.level),
            ("location", &self.location),
            ("organizer", &self.organizer),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| non_blank(Some(value.as_str())).is_none())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ScholarHubError::validation(format!(
                "All fields except link and image are required. Missing: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateScholarshipRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub location: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub organizer: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl UpdateScholarshipRequest {
    pub fn validate(&self) -> Result<()> {
        let supplied = [
            ("title", &self.title),
            ("description", &self.description),
            ("detail", &self.detail),
            ("category", &self.category),
            ("level", &self.level),
            ("location", &self.location),
            ("organizer", &self.organizer),
        ];

        if let Some((name, _)) = supplied
            .iter()
            .find(|(_, value)| matches!(value, Some(v) if v.trim().is_empty()))
        {
            return Err(ScholarHubError::validation(format!("{} cannot be empty", name)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateScholarshipRequest {
        CreateScholarshipRequest {
            title: "Beasiswa Unggulan".to_string(),
            description: "Full tuition".to_string(),
            detail: "Covers tuition and living costs".to_string(),
            category: "Sains".to_string(),
            level: "S1".to_string(),
            location: "Jakarta".to_string(),
            deadline: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            organizer: "Kemendikbud".to_string(),
            link: None,
            image: None,
        }
    }

    #[test]
    fn test_create_validation_lists_missing_fields() {
        assert!(request().validate().is_ok());

        let mut incomplete = request();
        incomplete.detail = String::new();
        incomplete.organizer = "  ".to_string();
        let err = incomplete.validate().unwrap_err();
        assert!(err.to_string().contains("detail"));
        assert!(err.to_string().contains("organizer"));
    }

    #[test]
    fn test_update_rejects_blank_supplied_field() {
        let update = UpdateScholarshipRequest {
            category: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(UpdateScholarshipRequest::default().validate().is_ok());
    }
}
