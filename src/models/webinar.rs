//! Webinar and webinar registration models

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::helpers::{is_valid_email, is_valid_phone, non_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Webinar {
    #[serde(skip_serializing)]
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub speaker: Option<String>,
    pub organizer: String,
    pub event_date: NaiveDate,
    pub event_time: Option<String>,
    pub status: String,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Webinar {
    pub fn status(&self) -> Result<WebinarStatus> {
        self.status.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebinarStatus {
    Upcoming,
    Ongoing,
    Finished,
    Cancelled,
}

impl WebinarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebinarStatus::Upcoming => "upcoming",
            WebinarStatus::Ongoing => "ongoing",
            WebinarStatus::Finished => "finished",
            WebinarStatus::Cancelled => "cancelled",
        }
    }

    /// Only upcoming webinars take new registrations
    pub fn accepts_registrations(&self) -> bool {
        matches!(self, WebinarStatus::Upcoming)
    }
}

impl fmt::Display for WebinarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebinarStatus {
    type Err = ScholarHubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => Ok(WebinarStatus::Upcoming),
            "ongoing" => Ok(WebinarStatus::Ongoing),
            "finished" => Ok(WebinarStatus::Finished),
            "cancelled" => Ok(WebinarStatus::Cancelled),
            other => Err(ScholarHubError::validation(format!("Invalid webinar status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWebinarRequest {
    pub title: String,
    pub description: Option<String>,
    pub speaker: Option<String>,
    pub organizer: String,
    pub event_date: NaiveDate,
    pub event_time: Option<String>,
    pub status: Option<WebinarStatus>,
    pub link: Option<String>,
}

impl CreateWebinarRequest {
    pub fn validate(&self) -> Result<()> {
        if non_blank(Some(&self.title)).is_none() {
            return Err(ScholarHubError::validation("Title is required"));
        }
        if non_blank(Some(&self.organizer)).is_none() {
            return Err(ScholarHubError::validation("Organizer is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWebinarRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub speaker: Option<String>,
    pub organizer: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub status: Option<WebinarStatus>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WebinarRegistration {
    #[serde(skip_serializing)]
    pub id: i64,
    pub uuid: Uuid,
    #[serde(skip_serializing)]
    pub webinar_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub education_level: String,
    pub institution: String,
    pub major: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration joined with the webinar it belongs to
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WebinarRegistrationView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub registration: WebinarRegistration,
    pub webinar_uuid: Uuid,
    pub webinar_title: String,
    pub webinar_date: NaiveDate,
    pub webinar_time: Option<String>,
    pub webinar_organizer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Registered,
    Attended,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Attended => "attended",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for RegistrationStatus {
    fn default() -> Self {
        RegistrationStatus::Registered
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = ScholarHubError;

    /// Accepts the canonical values and the legacy `terdaftar`/`hadir`/`dibatalkan` labels
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(RegistrationStatus::Pending),
            "registered" | "terdaftar" => Ok(RegistrationStatus::Registered),
            "attended" | "hadir" => Ok(RegistrationStatus::Attended),
            "cancelled" | "dibatalkan" => Ok(RegistrationStatus::Cancelled),
            _ => Err(ScholarHubError::validation(
                "Invalid registration status. Choose one of 'pending', 'registered', 'attended' or 'cancelled'",
            )),
        }
    }
}

pub const EDUCATION_LEVELS: [&str; 6] = ["SMA/SMK", "D3", "S1", "S2", "S3", "Lainnya"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterWebinarRequest {
    #[serde(alias = "webinarId")]
    pub webinar_id: Option<String>,
    pub name: Option<String>,
    pub education_level: Option<String>,
    pub institution: Option<String>,
    pub major: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub reason: Option<String>,
}

/// Registration input after validation, ready for the guard
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub webinar_uuid: Uuid,
    pub name: String,
    pub education_level: String,
    pub institution: String,
    pub major: Option<String>,
    pub email: String,
    pub phone: String,
    pub reason: String,
}

impl RegisterWebinarRequest {
    /// Check required fields and formats, reporting every missing field at once
    pub fn validate(self) -> Result<NewRegistration> {
        let mut missing = Vec::new();
        let text_fields = [
            ("webinar_id", &self.webinar_id),
            ("name", &self.name),
            ("education_level", &self.education_level),
            ("institution", &self.institution),
            ("email", &self.email),
            ("phone", &self.phone),
            ("reason", &self.reason),
        ];
        for (field, value) in text_fields {
            if non_blank(value.as_deref()).is_none() {
                missing.push(field);
            }
        }
        if !missing.is_empty() {
            return Err(ScholarHubError::validation(format!(
                "All fields are required for registration. Missing: {}",
                missing.join(", ")
            )));
        }

        let email = self.email.unwrap_or_default().trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(ScholarHubError::validation("Invalid email format"));
        }

        let phone = self.phone.unwrap_or_default().trim().to_string();
        if !is_valid_phone(&phone) {
            return Err(ScholarHubError::validation("Invalid phone number. Use 10 to 15 digits"));
        }

        let education_level = self.education_level.unwrap_or_default().trim().to_string();
        if !EDUCATION_LEVELS.contains(&education_level.as_str()) {
            return Err(ScholarHubError::validation(format!(
                "Invalid education level. Choose one of: {}",
                EDUCATION_LEVELS.join(", ")
            )));
        }

        // An identifier that is not a UUID cannot name an existing webinar
        let webinar_uuid = Uuid::parse_str(self.webinar_id.unwrap_or_default().trim())
            .map_err(|_| ScholarHubError::not_found("Webinar not found"))?;

        Ok(NewRegistration {
            webinar_uuid,
            name: self.name.unwrap_or_default().trim().to_string(),
            education_level,
            institution: self.institution.unwrap_or_default().trim().to_string(),
            major: non_blank(self.major.as_deref()).map(str::to_string),
            email,
            phone,
            reason: self.reason.unwrap_or_default().trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRegistrationRequest {
    pub name: Option<String>,
    pub education_level: Option<String>,
    pub institution: Option<String>,
    pub major: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
}

impl UpdateRegistrationRequest {
    /// Validate supplied fields and normalize the status to its canonical form
    pub fn validate(mut self) -> Result<Self> {
        if let Some(email) = self.email.take() {
            let email = email.trim().to_lowercase();
            if !is_valid_email(&email) {
                return Err(ScholarHubError::validation("Invalid email format"));
            }
            self.email = Some(email);
        }
        if let Some(phone) = &self.phone {
            if !is_valid_phone(phone.trim()) {
                return Err(ScholarHubError::validation("Invalid phone number. Use 10 to 15 digits"));
            }
        }
        if let Some(level) = &self.education_level {
            if !EDUCATION_LEVELS.contains(&level.trim()) {
                return Err(ScholarHubError::validation("Invalid education level"));
            }
        }
        if let Some(status) = self.status.take() {
            let status: RegistrationStatus = status.parse()?;
            self.status = Some(status.as_str().to_string());
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationListQuery {
    #[serde(rename = "webinarId")]
    pub webinar_id: Option<String>,
    pub status_pendaftaran: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn complete_request() -> RegisterWebinarRequest {
        RegisterWebinarRequest {
            webinar_id: Some(Uuid::new_v4().to_string()),
            name: Some("Andi".to_string()),
            education_level: Some("S1".to_string()),
            institution: Some("Universitas Indonesia".to_string()),
            major: Some("   ".to_string()),
            email: Some("a@x.com".to_string()),
            phone: Some("081234567890".to_string()),
            reason: Some("Ingin belajar".to_string()),
        }
    }

    #[test]
    fn test_valid_registration() {
        let mut request = complete_request();
        request.email = Some(" A@X.com ".to_string());
        let registration = request.validate().unwrap();
        assert_eq!(registration.email, "a@x.com");
        assert_eq!(registration.major, None);
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let mut request = complete_request();
        request.webinar_id = None;
        request.phone = None;
        let err = request.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("webinar_id"));
        assert!(msg.contains("phone"));
        assert!(!msg.contains("email"));
    }

    #[test]
    fn test_invalid_formats() {
        let mut request = complete_request();
        request.email = Some("bukan-email".to_string());
        assert_matches!(request.validate(), Err(ScholarHubError::Validation(_)));

        let mut request = complete_request();
        request.phone = Some("12345".to_string());
        assert_matches!(request.validate(), Err(ScholarHubError::Validation(_)));

        let mut request = complete_request();
        request.education_level = Some("S4".to_string());
        assert_matches!(request.validate(), Err(ScholarHubError::Validation(_)));
    }

    #[test]
    fn test_unparseable_webinar_id_is_not_found() {
        let mut request = complete_request();
        request.webinar_id = Some("W1".to_string());
        assert_matches!(request.validate(), Err(ScholarHubError::NotFound(_)));
    }

    #[test]
    fn test_registration_status_parsing() {
        assert_eq!("terdaftar".parse::<RegistrationStatus>().unwrap(), RegistrationStatus::Registered);
        assert_eq!("HADIR".parse::<RegistrationStatus>().unwrap(), RegistrationStatus::Attended);
        assert_eq!("cancelled".parse::<RegistrationStatus>().unwrap(), RegistrationStatus::Cancelled);
        assert!("lost".parse::<RegistrationStatus>().is_err());
        assert_eq!(RegistrationStatus::default(), RegistrationStatus::Registered);
    }

    #[test]
    fn test_update_normalizes_status() {
        let update = UpdateRegistrationRequest {
            status: Some("Dibatalkan".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(update.status.as_deref(), Some("cancelled"));
    }

    #[test]
    fn test_only_upcoming_webinars_accept_registrations() {
        assert!(WebinarStatus::Upcoming.accepts_registrations());
        assert!(!WebinarStatus::Ongoing.accepts_registrations());
        assert!(!WebinarStatus::Finished.accepts_registrations());
        assert!(!WebinarStatus::Cancelled.accepts_registrations());
    }
}
