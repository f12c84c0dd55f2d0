//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ScholarHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_session_config(&settings.session)?;
    validate_media_config(&settings.media)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(ScholarHubError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.public_base_url.is_empty() {
        return Err(ScholarHubError::Config(
            "Public base URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ScholarHubError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(ScholarHubError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ScholarHubError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.cookie_name.is_empty() {
        return Err(ScholarHubError::Config(
            "Session cookie name is required".to_string()
        ));
    }

    if config.ttl_hours <= 0 {
        return Err(ScholarHubError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate media configuration
fn validate_media_config(config: &super::MediaConfig) -> Result<()> {
    if config.public_dir.is_empty() {
        return Err(ScholarHubError::Config(
            "Media public directory is required".to_string()
        ));
    }

    if config.max_upload_bytes == 0 {
        return Err(ScholarHubError::Config(
            "Max upload size must be greater than 0".to_string()
        ));
    }

    if config.allowed_extensions.is_empty() {
        return Err(ScholarHubError::Config(
            "At least one allowed upload extension is required".to_string()
        ));
    }

    if let Some(ext) = config.allowed_extensions.iter().find(|ext| !ext.starts_with('.')) {
        return Err(ScholarHubError::Config(
            format!("Upload extension must start with a dot: {}", ext)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ScholarHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ScholarHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
