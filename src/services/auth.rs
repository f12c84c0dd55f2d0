//! Authentication service implementation
//!
//! This service handles account sign-up, password login and server-side
//! sessions. The browser only ever holds an opaque random token; the
//! database stores its SHA-256 digest.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use crate::config::SessionConfig;
use crate::database::repositories::{SessionRepository, UserRepository};
use crate::models::session::CreateSessionRequest;
use crate::models::user::{CreateUserRequest, LoginRequest, Role, User};
use crate::utils::errors::{ScholarHubError, Result};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Hash a password with argon2 and a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ScholarHubError::PasswordHash(e.to_string()))
}

/// Check a password against a stored argon2 hash; malformed hashes never match
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "Stored password hash could not be parsed");
            false
        }
    }
}

/// Generate an opaque session token: 256 random bits, hex encoded
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest stored in place of the raw token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// A freshly created login session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user: User,
    pub token: String,
    pub max_age_seconds: i64,
}

/// Authentication service for accounts and sessions
#[derive(Clone, Debug)]
pub struct AuthService {
    users: UserRepository,
    sessions: SessionRepository,
    ttl: Duration,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: UserRepository, sessions: SessionRepository, config: &SessionConfig) -> Self {
        Self {
            users,
            sessions,
            ttl: Duration::hours(config.ttl_hours),
        }
    }

    /// Register a new account with the `user` role
    pub async fn sign_up(&self, request: CreateUserRequest) -> Result<User> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ScholarHubError::conflict("Email is already registered"));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .users
            .create(request.name.trim(), &email, &password_hash, Role::User.as_str())
            .await
            .map_err(|e| e.on_unique_violation("Email is already registered"))?;

        info!(user_id = user.id, "New account registered");
        Ok(user)
    }

    /// Verify credentials and open a session
    pub async fn login(&self, request: LoginRequest) -> Result<IssuedSession> {
        let user = match self.users.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                debug!("Login attempt for unknown email");
                return Err(ScholarHubError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(&request.password, &user.password_hash) {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(ScholarHubError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token();
        self.sessions
            .create(CreateSessionRequest {
                token_hash: hash_token(&token),
                user_id: user.id,
                expires_at: Utc::now() + self.ttl,
            })
            .await?;

        info!(user_id = user.id, "User logged in");
        Ok(IssuedSession {
            user,
            token,
            max_age_seconds: self.ttl.num_seconds(),
        })
    }

    /// Close the session behind a token; unknown tokens are ignored
    pub async fn logout(&self, token: &str) -> Result<()> {
        if self.sessions.delete(&hash_token(token)).await? {
            debug!("Session closed");
        }
        Ok(())
    }

    /// Resolve the user behind a session token, if the session is still valid
    pub async fn resolve(&self, token: &str) -> Result<Option<User>> {
        let session = match self.sessions.find_active(&hash_token(token)).await? {
            Some(session) if !session.is_expired(Utc::now()) => session,
            _ => return Ok(None),
        };

        self.users.find_by_id(session.user_id).await
    }

    /// Drop sessions past their expiry
    pub async fn purge_expired_sessions(&self) -> Result<u64> {
        let removed = self.sessions.clean_expired().await?;
        if removed > 0 {
            info!(removed = removed, "Expired sessions purged");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("rahasia123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("rahasia123", &hash));
        assert!(!verify_password("salah", &hash));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("anything", "not-a-hash"));
    }

    #[test]
    fn test_tokens_are_random_and_hashed() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);

        let digest = hash_token(&a);
        assert_eq!(digest.len(), 64);
        assert_ne!(digest, a);
        assert_eq!(digest, hash_token(&a));
    }
}
