//! Derived mabar session status
//!
//! A session has no stored status of its own; its visible status follows the
//! funding booking.

use crate::models::booking::BookingStatus;
use crate::models::session::MabarSessionStatus;

/// Derive the session's visible status from its funding booking
pub fn derived_status(funding: BookingStatus) -> MabarSessionStatus {
    match funding {
        BookingStatus::Created | BookingStatus::WaitingPayment => {
            MabarSessionStatus::AwaitingHostPayment
        }
        BookingStatus::Active | BookingStatus::Completed => MabarSessionStatus::Open,
        BookingStatus::Expired | BookingStatus::Failed | BookingStatus::Cancelled => {
            MabarSessionStatus::Void
        }
    }
}

/// Whether a session in this derived status accepts new join requests
pub fn is_joinable(status: MabarSessionStatus) -> bool {
    matches!(status, MabarSessionStatus::Open)
}

/// Whether host-side edits are still permitted
pub fn is_editable(status: MabarSessionStatus) -> bool {
    !matches!(status, MabarSessionStatus::Void)
}
