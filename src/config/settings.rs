//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub gateway: GatewayConfig,
    pub settlement: SettlementConfig,
    pub logging: LoggingConfig,
}

/// Remote booking API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Payment gateway widget configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    pub client_key: String,
    /// "sandbox" or "production"
    pub environment: String,
}

/// Settlement window policy
///
/// These windows define the conflict/expiry behavior of unpaid bookings.
/// Expiry itself is enforced server-side; the values here are surfaced for
/// advisory countdowns and for validating resume flows, and the funding
/// window for mabar sessions is deliberately separate from the individual
/// booking window.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettlementConfig {
    pub individual_minutes: i64,
    pub session_funding_minutes: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_files: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("COURTBUDDY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CourtBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://api.courtbuddy.id".to_string(),
                timeout_seconds: 10,
            },
            gateway: GatewayConfig {
                client_key: String::new(),
                environment: "sandbox".to_string(),
            },
            settlement: SettlementConfig {
                individual_minutes: 15,
                session_funding_minutes: 60,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/courtbuddy".to_string(),
                max_files: 5,
            },
        }
    }
}
