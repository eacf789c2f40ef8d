//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the CourtBuddy booking core.

use tracing::{info, warn, debug};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "courtbuddy.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log booking lifecycle events with structured data
pub fn log_booking_event(invoice: &str, event: &str, details: Option<&str>) {
    info!(
        invoice = invoice,
        event = event,
        details = details,
        "Booking event"
    );
}

/// Log payment gateway outcomes
pub fn log_payment_event(invoice: &str, outcome: &str, recoverable: bool) {
    if recoverable {
        debug!(
            invoice = invoice,
            outcome = outcome,
            "Payment gateway outcome"
        );
    } else {
        warn!(
            invoice = invoice,
            outcome = outcome,
            "Payment gateway outcome requires attention"
        );
    }
}

/// Log mabar session events
pub fn log_session_event(session_id: i64, event: &str, participant_id: Option<i64>, details: Option<&str>) {
    info!(
        session_id = session_id,
        event = event,
        participant_id = participant_id,
        details = details,
        "Session event"
    );
}

/// Log remote API errors with context
pub fn log_api_error(endpoint: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        endpoint = endpoint,
        error = error,
        context = context,
        "Remote API error"
    );
}
