//! CourtBuddy booking core
//!
//! The reservation, payment and group-session lifecycle core of the CourtBuddy
//! futsal court booking platform. This library provides the slot availability
//! resolver, the booking state machine, the payment-gateway orchestration and
//! the mabar (play-together) session lifecycle, with the remote booking API
//! and the payment widget kept behind trait boundaries.

#![allow(non_snake_case)]

pub mod api;
pub mod config;
pub mod gateway;
pub mod lifecycle;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CourtBuddyError, NextAction, Result};

// Re-export main components for easy access
pub use api::{BookingApi, HttpBookingApi};
pub use gateway::{PaymentOutcome, PaymentWidget};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
