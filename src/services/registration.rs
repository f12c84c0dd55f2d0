//! Registration guard
//!
//! Webinar registrations and mentoring joins pass the same ordered checks:
//! the event must exist, its status must allow new sign-ups, and the email
//! must not be registered yet. The first failing check decides the error.
//! The unique constraints on (event, email) backstop concurrent requests.

use tracing::debug;
use uuid::Uuid;
use crate::database::repositories::{MentoringRepository, RegistrationRepository, WebinarRepository};
use crate::models::mentoring::{MentoringParticipant, MentoringSession};
use crate::models::user::User;
use crate::models::webinar::{NewRegistration, RegistrationStatus, Webinar, WebinarRegistration};
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::logging::log_registration;

/// Existence check: a missing webinar is a 404
pub fn ensure_webinar_found(webinar: Option<Webinar>) -> Result<Webinar> {
    webinar.ok_or_else(|| ScholarHubError::not_found("Webinar not found"))
}

/// Status gate: only upcoming webinars take registrations
pub fn ensure_webinar_open(webinar: &Webinar) -> Result<()> {
    let status = webinar.status()?;
    if !status.accepts_registrations() {
        return Err(ScholarHubError::BusinessRule(format!(
            "Registration is closed: webinar status is '{}'",
            status
        )));
    }
    Ok(())
}

/// Existence check for mentoring sessions
pub fn ensure_mentoring_found(session: Option<MentoringSession>) -> Result<MentoringSession> {
    session.ok_or_else(|| ScholarHubError::not_found("Mentoring session not found"))
}

/// Status gate: a full session rejects new participants
pub fn ensure_mentoring_open(session: &MentoringSession) -> Result<()> {
    if !session.status()?.accepts_participants() {
        return Err(ScholarHubError::BusinessRule("Mentoring session is full".to_string()));
    }
    Ok(())
}

/// Uniqueness check per (event, email)
pub fn ensure_not_registered(already_registered: bool, email: &str) -> Result<()> {
    if already_registered {
        return Err(ScholarHubError::conflict(format!("Email {} is already registered", email)));
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct RegistrationService {
    webinars: WebinarRepository,
    registrations: RegistrationRepository,
    mentoring: MentoringRepository,
}

impl RegistrationService {
    pub fn new(
        webinars: WebinarRepository,
        registrations: RegistrationRepository,
        mentoring: MentoringRepository,
    ) -> Self {
        Self {
            webinars,
            registrations,
            mentoring,
        }
    }

    /// Register for a webinar; the acting user is attached when known
    pub async fn register_for_webinar(
        &self,
        registration: NewRegistration,
        user_id: Option<i64>,
    ) -> Result<WebinarRegistration> {
        let webinar = ensure_webinar_found(self.webinars.find_by_uuid(registration.webinar_uuid).await?)?;
        ensure_webinar_open(&webinar)?;

        let taken = self.registrations.is_registered(webinar.id, &registration.email).await?;
        ensure_not_registered(taken, &registration.email)?;

        let duplicate_msg = format!("Email {} is already registered", registration.email);
        let created = self
            .registrations
            .create(webinar.id, user_id, &registration, RegistrationStatus::default())
            .await
            .map_err(|e| e.on_unique_violation(duplicate_msg))?;

        log_registration("webinar", &webinar.uuid.to_string(), &created.email, user_id);
        Ok(created)
    }

    /// Join a mentoring session as the acting user
    pub async fn join_mentoring(&self, mentoring_uuid: Uuid, user: &User) -> Result<(MentoringSession, MentoringParticipant)> {
        let session = ensure_mentoring_found(self.mentoring.find_by_uuid(mentoring_uuid).await?)?;
        ensure_mentoring_open(&session)?;

        let email = user.email.to_lowercase();
        let taken = self.mentoring.is_participant(session.id, &email).await?;
        ensure_not_registered(taken, &email)?;

        let duplicate_msg = format!("Email {} is already registered", email);
        let participant = self
            .mentoring
            .add_participant(session.id, user.id, &email)
            .await
            .map_err(|e| e.on_unique_violation(duplicate_msg))?;

        debug!(mentoring_id = session.id, user_id = user.id, "Participant recorded");
        log_registration("mentoring", &session.uuid.to_string(), &email, Some(user.id));
        Ok((session, participant))
    }
}
