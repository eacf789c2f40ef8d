//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CourtBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_gateway_config(&settings.gateway)?;
    validate_settlement_config(&settings.settlement)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate remote API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(CourtBuddyError::Config(
            "API base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url).map_err(|e| {
        CourtBuddyError::Config(format!("Invalid API base URL: {}", e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(CourtBuddyError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate payment gateway configuration
fn validate_gateway_config(config: &super::GatewayConfig) -> Result<()> {
    if config.client_key.is_empty() {
        return Err(CourtBuddyError::Config(
            "Gateway client key is required".to_string()
        ));
    }

    let valid_environments = ["sandbox", "production"];
    if !valid_environments.contains(&config.environment.as_str()) {
        return Err(CourtBuddyError::Config(
            format!("Invalid gateway environment: {}. Valid environments: {:?}", config.environment, valid_environments)
        ));
    }

    Ok(())
}

/// Validate settlement window configuration
fn validate_settlement_config(config: &super::SettlementConfig) -> Result<()> {
    if config.individual_minutes <= 0 {
        return Err(CourtBuddyError::Config(
            "Individual settlement window must be greater than 0".to_string()
        ));
    }

    if config.session_funding_minutes <= 0 {
        return Err(CourtBuddyError::Config(
            "Session funding settlement window must be greater than 0".to_string()
        ));
    }

    if config.session_funding_minutes < config.individual_minutes {
        return Err(CourtBuddyError::Config(
            "Session funding window cannot be shorter than the individual window".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CourtBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CourtBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
