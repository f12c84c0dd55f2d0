//! Request-scoped identity
//!
//! The acting user is resolved once per request from the session cookie and
//! cached in the request extensions; handlers receive it through extractors.

use crate::models::user::User;
use crate::utils::errors::{ScholarHubError, Result};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub user: Option<User>,
    /// Raw session token presented by the client, if any
    pub token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_user(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The session user, or 401
    pub fn require_user(&self) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| ScholarHubError::Unauthenticated("Please log in to your account".to_string()))
    }

    /// The session user when it holds the admin role; 401 without a session, 403 otherwise
    pub fn require_admin(&self) -> Result<&User> {
        let user = self.require_user()?;
        if !user.is_admin() {
            return Err(ScholarHubError::PermissionDenied("Access denied: admin only".to_string()));
        }
        Ok(user)
    }
}
