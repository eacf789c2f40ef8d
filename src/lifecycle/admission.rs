//! Participant admission transition rules
//!
//! Self-service path: awaiting_approval -> (approved | rejected), with an
//! alternate pre-payment branch waiting_payment -> awaiting_approval first.
//! A joiner may self-cancel from any non-terminal state. Host-entered guests
//! are created directly at approved and never walk these edges.

use crate::models::participant::{AdmissionStatus, Participant};
use crate::utils::errors::{CourtBuddyError, Result};

/// Whether `from -> to` is a legal admission transition
pub fn can_transition(from: AdmissionStatus, to: AdmissionStatus) -> bool {
    use AdmissionStatus::*;
    match (from, to) {
        // Proof uploaded, seat moves to host review
        (WaitingPayment, AwaitingApproval) => true,
        (AwaitingApproval, Approved) => true,
        (AwaitingApproval, Rejected) => true,
        // Host may reject an unpaid claim outright
        (WaitingPayment, Rejected) => true,
        // Self-cancel from any non-terminal state
        (WaitingPayment, Cancelled) => true,
        (AwaitingApproval, Cancelled) => true,
        (Approved, Cancelled) => true,
        _ => false,
    }
}

/// Apply a transition to a participant, rejecting illegal moves
pub fn transition(participant: &mut Participant, to: AdmissionStatus) -> Result<()> {
    if !can_transition(participant.status, to) {
        return Err(CourtBuddyError::InvalidStateTransition {
            from: participant.status.to_string(),
            to: to.to_string(),
        });
    }
    participant.status = to;
    Ok(())
}

/// The status a self-service joiner starts in
pub fn initial_status(requires_prepayment: bool) -> AdmissionStatus {
    if requires_prepayment {
        AdmissionStatus::WaitingPayment
    } else {
        AdmissionStatus::AwaitingApproval
    }
}

/// The status a host-entered guest starts in.
///
/// The host is vouching for an off-platform seat sale, so the guest enters
/// admitted without upload or approval steps.
pub fn guest_status() -> AdmissionStatus {
    AdmissionStatus::Approved
}
