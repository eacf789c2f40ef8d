//! Booking model and lifecycle status

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a booking.
///
/// Bookings are never deleted; a finished booking is moved to one of the
/// terminal statuses and kept for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Created,
    WaitingPayment,
    Active,
    Completed,
    Expired,
    Failed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Created => "created",
            BookingStatus::WaitingPayment => "waiting_payment",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Expired => "expired",
            BookingStatus::Failed => "failed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether this status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed
                | BookingStatus::Expired
                | BookingStatus::Failed
                | BookingStatus::Cancelled
        )
    }

    /// Whether a booking in this status still holds its slots.
    ///
    /// Completed bookings are history, not holds, so only the live statuses
    /// keep a slot off the availability grid.
    pub fn holds_slots(&self) -> bool {
        matches!(
            self,
            BookingStatus::Created | BookingStatus::WaitingPayment | BookingStatus::Active
        )
    }

    /// Whether the owner may still cancel
    pub fn is_cancellable(&self) -> bool {
        matches!(self, BookingStatus::WaitingPayment | BookingStatus::Active)
    }

    /// Human label for this status
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Created => "Created",
            BookingStatus::WaitingPayment => "Waiting for payment",
            BookingStatus::Active => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Expired => "Expired",
            BookingStatus::Failed => "Payment failed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(BookingStatus::Created),
            "waiting_payment" => Ok(BookingStatus::WaitingPayment),
            "active" => Ok(BookingStatus::Active),
            "completed" => Ok(BookingStatus::Completed),
            "expired" => Ok(BookingStatus::Expired),
            "failed" => Ok(BookingStatus::Failed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// Who owns a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingOwner {
    Registered { user_id: i64 },
    Guest { name: String, phone: String },
}

/// A reservation of one or more slots on one field for one date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub invoice: String,
    pub owner: BookingOwner,
    pub field_id: i64,
    pub date: NaiveDate,
    /// Ordered slot labels, e.g. ["14:00", "15:00"]
    pub slots: Vec<String>,
    pub total_price: i64,
    pub status: BookingStatus,
    /// Set when this booking funds a mabar session
    pub mabar_session_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    /// Settlement deadline while unpaid; advisory on the client, the server
    /// owns the actual expiry transition
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub field_id: i64,
    pub date: NaiveDate,
    pub slots: Vec<String>,
    pub owner: BookingOwner,
}

/// Remote response to a successful booking creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedBooking {
    pub invoice: String,
    pub gateway_token: String,
}

/// A booking together with its payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetail {
    pub booking: Booking,
    pub transaction: crate::models::transaction::Transaction,
}
