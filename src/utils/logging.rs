//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ScholarHub application.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{Result, ScholarHubError};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer when dropped and must be held
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ScholarHubError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer().with_writer(std::io::stdout).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| ScholarHubError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        "Admin action performed"
    );
}

/// Log registration outcomes for webinars and mentoring sessions
pub fn log_registration(event_kind: &str, event_uuid: &str, email: &str, user_id: Option<i64>) {
    info!(
        event_kind = event_kind,
        event_uuid = event_uuid,
        email = email,
        user_id = user_id,
        "Registration created"
    );
}

/// Log media file operations
pub fn log_media_operation(operation: &str, path: &str, success: bool) {
    if success {
        debug!(operation = operation, path = path, "Media operation completed");
    } else {
        warn!(operation = operation, path = path, "Media operation failed");
    }
}

