//! State management module
//!
//! This module holds the shared application state and the per-request context

pub mod context;

pub use context::RequestContext;

use std::sync::Arc;
use crate::config::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::services::ServiceFactory;

/// Shared state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub database: DatabaseService,
    pub services: ServiceFactory,
}

impl AppState {
    pub fn new(pool: DatabasePool, settings: Settings) -> Self {
        let database = DatabaseService::new(pool);
        let services = ServiceFactory::new(&database, &settings);

        Self {
            settings: Arc::new(settings),
            database,
            services,
        }
    }
}
