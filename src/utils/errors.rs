//! Error handling for CourtBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy. Every error maps to a
//! user-facing next action so no flow ends in a dead end.

use thiserror::Error;

/// Main error type for CourtBuddy operations
#[derive(Error, Debug)]
pub enum CourtBuddyError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Slot conflict on field {field_id} for {date}: {detail}")]
    SlotConflict {
        field_id: i64,
        date: chrono::NaiveDate,
        detail: String,
    },

    #[error("Session {session_id} is full ({slots_total} seats)")]
    SessionFull { session_id: i64, slots_total: i32 },

    #[error("Session {session_id} is not joinable: {reason}")]
    SessionNotJoinable { session_id: i64, reason: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Booking not found: {invoice}")]
    BookingNotFound { invoice: String },

    #[error("Field not found: {field_id}")]
    FieldNotFound { field_id: i64 },

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: i64 },

    #[error("Participant not found: {participant_id}")]
    ParticipantNotFound { participant_id: i64 },

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Booking expired: {invoice}")]
    BookingExpired { invoice: String },

    #[error("Participant {participant_id} has no payment proof uploaded")]
    ProofRequired { participant_id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for CourtBuddy operations
pub type Result<T> = std::result::Result<T, CourtBuddyError>;

/// The next step a caller should offer the user after an error.
///
/// Conflicts are never retried verbatim and an expired booking is never
/// resurrected, so each variant names the one recovery path that is valid
/// for its class of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Retry the same operation (transient gateway or transport failure)
    Retry,
    /// Re-resolve availability and let the user pick different slots
    ReselectSlots,
    /// Re-fetch the session roster and capacity before trying again
    RefreshRoster,
    /// Redirect to authentication
    Reauthenticate,
    /// Start a fresh booking from the old parameters
    BookAgain,
    /// Fix the submitted input
    CorrectInput,
    /// Terminal; show a generic error state
    None,
}

impl CourtBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CourtBuddyError::Validation(_) => true,
            CourtBuddyError::SlotConflict { .. } => true,
            CourtBuddyError::SessionFull { .. } => true,
            CourtBuddyError::SessionNotJoinable { .. } => false,
            CourtBuddyError::Authentication(_) => true,
            CourtBuddyError::BookingNotFound { .. } => false,
            CourtBuddyError::FieldNotFound { .. } => false,
            CourtBuddyError::SessionNotFound { .. } => false,
            CourtBuddyError::ParticipantNotFound { .. } => false,
            CourtBuddyError::Gateway(_) => true,
            CourtBuddyError::BookingExpired { .. } => true,
            CourtBuddyError::ProofRequired { .. } => true,
            CourtBuddyError::InvalidStateTransition { .. } => false,
            CourtBuddyError::Config(_) => false,
            CourtBuddyError::Api { .. } => false,
            CourtBuddyError::Http(_) => true,
            CourtBuddyError::Serialization(_) => false,
            CourtBuddyError::Io(_) => true,
            CourtBuddyError::UrlParse(_) => false,
        }
    }

    /// Map the error to the next action the user should be offered
    pub fn next_action(&self) -> NextAction {
        match self {
            CourtBuddyError::Validation(_) => NextAction::CorrectInput,
            CourtBuddyError::SlotConflict { .. } => NextAction::ReselectSlots,
            CourtBuddyError::SessionFull { .. } => NextAction::RefreshRoster,
            CourtBuddyError::SessionNotJoinable { .. } => NextAction::RefreshRoster,
            CourtBuddyError::Authentication(_) => NextAction::Reauthenticate,
            CourtBuddyError::Gateway(_) => NextAction::Retry,
            CourtBuddyError::BookingExpired { .. } => NextAction::BookAgain,
            CourtBuddyError::ProofRequired { .. } => NextAction::CorrectInput,
            CourtBuddyError::Http(_) | CourtBuddyError::Io(_) => NextAction::Retry,
            _ => NextAction::None,
        }
    }
}
