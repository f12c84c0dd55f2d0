//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod session;
pub mod scholarship;
pub mod mentoring;
pub mod webinar;
pub mod registration;

// Re-export repositories
pub use user::UserRepository;
pub use session::SessionRepository;
pub use scholarship::ScholarshipRepository;
pub use mentoring::MentoringRepository;
pub use webinar::WebinarRepository;
pub use registration::RegistrationRepository;
