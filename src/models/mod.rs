//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod scholarship;
pub mod mentoring;
pub mod webinar;
pub mod session;

// Re-export commonly used models
pub use user::{User, Role, UserProfile, CreateUserRequest, LoginRequest, UpdateProfileRequest};
pub use scholarship::{Scholarship, CreateScholarshipRequest, UpdateScholarshipRequest};
pub use mentoring::{MentoringSession, MentoringSessionView, MentoringParticipant, MentoringStatus, CreateMentoringRequest, UpdateMentoringRequest, PhotoChange, JoinMentoringResponse};
pub use webinar::{Webinar, WebinarStatus, CreateWebinarRequest, UpdateWebinarRequest, WebinarRegistration, WebinarRegistrationView, RegistrationStatus, RegisterWebinarRequest, NewRegistration, UpdateRegistrationRequest, RegistrationListQuery};
pub use session::{Session, CreateSessionRequest};
