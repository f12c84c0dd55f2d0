//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod filter;
pub mod media;
pub mod mentoring;
pub mod registration;
pub mod user;

// Re-export commonly used services
pub use auth::{AuthService, IssuedSession};
pub use filter::{ScholarshipFilter, ScholarshipQuery, RegistrationFilter};
pub use media::{MediaKind, MediaStore, Upload};
pub use mentoring::{MentoringService, PhotoEdit};
pub use registration::RegistrationService;
pub use user::{UserService, ProfileImage};

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub mentoring_service: MentoringService,
    pub registration_service: RegistrationService,
    pub media: MediaStore,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: &DatabaseService, settings: &Settings) -> Self {
        let media = MediaStore::new(&settings.media);

        Self {
            auth_service: AuthService::new(database.users.clone(), database.sessions.clone(), &settings.session),
            user_service: UserService::new(database.users.clone(), media.clone(), &settings.server.public_base_url),
            mentoring_service: MentoringService::new(database.mentoring.clone(), media.clone()),
            registration_service: RegistrationService::new(
                database.webinars.clone(),
                database.registrations.clone(),
                database.mentoring.clone(),
            ),
            media,
        }
    }
}
