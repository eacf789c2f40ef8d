//! Booking lifecycle transition rules
//!
//! created -> waiting_payment -> {active, expired, failed, cancelled}
//! active -> completed, and active/waiting_payment -> cancelled by the owner.

use crate::models::booking::{Booking, BookingStatus};
use crate::utils::errors::{CourtBuddyError, Result};

/// Whether `from -> to` is a legal booking transition
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    match (from, to) {
        (Created, WaitingPayment) => true,
        (WaitingPayment, Active) => true,
        // Server-owned settlement window lapse
        (WaitingPayment, Expired) => true,
        // Explicit gateway failure callback
        (WaitingPayment, Failed) => true,
        (WaitingPayment, Cancelled) => true,
        (Active, Cancelled) => true,
        // Externally driven once the booked date has passed
        (Active, Completed) => true,
        _ => false,
    }
}

/// Apply a transition to a booking, rejecting illegal moves
pub fn transition(booking: &mut Booking, to: BookingStatus) -> Result<()> {
    if !can_transition(booking.status, to) {
        return Err(CourtBuddyError::InvalidStateTransition {
            from: booking.status.to_string(),
            to: to.to_string(),
        });
    }
    booking.status = to;
    if !to.holds_slots() || to == BookingStatus::Active {
        booking.expires_at = None;
    }
    Ok(())
}
