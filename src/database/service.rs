//! Database service layer
//!
//! This module bundles the repositories behind one cloneable handle

use crate::database::{
    DatabasePool, UserRepository, SessionRepository, ScholarshipRepository, MentoringRepository,
    WebinarRepository, RegistrationRepository,
};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub scholarships: ScholarshipRepository,
    pub mentoring: MentoringRepository,
    pub webinars: WebinarRepository,
    pub registrations: RegistrationRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            scholarships: ScholarshipRepository::new(pool.clone()),
            mentoring: MentoringRepository::new(pool.clone()),
            webinars: WebinarRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<()> {
        super::connection::health_check(&self.pool).await
    }
}
