//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod slot;
pub mod booking;
pub mod transaction;
pub mod session;
pub mod participant;

// Re-export commonly used models
pub use slot::{TimeSlot, OperatingHours, FieldSchedule, BlackoutWindow, Field};
pub use booking::{Booking, BookingStatus, BookingOwner, CreateBookingRequest, CreatedBooking, BookingDetail};
pub use transaction::{Transaction, TransactionStatus};
pub use session::{MabarSession, MabarSessionType, MabarSessionStatus, CreateMabarSessionRequest, UpdateMabarSessionRequest, CreatedSession};
pub use participant::{Participant, ParticipantIdentity, AdmissionStatus, JoinSessionRequest};
