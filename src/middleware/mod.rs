//! Middleware module
//!
//! This module contains middleware and extractors for request processing

pub mod auth;
pub mod logging;

// Re-export commonly used middleware
pub use auth::{AdminUser, CurrentUser, MaybeUser, SessionToken};
pub use logging::log_requests;
