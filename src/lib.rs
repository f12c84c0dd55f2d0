//! ScholarHub backend
//!
//! REST service for scholarship postings, mentoring sessions, webinars and
//! webinar registrations, with session-cookie authentication and per-user
//! profiles.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;
pub mod middleware;

pub use config::Settings;
pub use utils::errors::{ScholarHubError, Result};

pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::AppState;
pub use handlers::create_router;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// `name vX.Y.Z` banner for startup logs
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
