//! Mabar session service
//!
//! Host and participant operations for play-together sessions. The session's
//! visible status is always derived from its funding booking, and the seat
//! roster is arbitrated server-side: pre-checks here give fast feedback, but
//! a `SessionFull` answer from the remote is the final word.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::BookingApi;
use crate::config::settings::Settings;
use crate::lifecycle::session::{derived_status, is_editable, is_joinable};
use crate::models::booking::CreateBookingRequest;
use crate::models::participant::{JoinSessionRequest, Participant};
use crate::models::session::{
    CreateMabarSessionRequest, CreatedSession, MabarSession, MabarSessionStatus,
    UpdateMabarSessionRequest,
};
use crate::utils::errors::{CourtBuddyError, Result};
use crate::utils::logging::log_session_event;

/// Mabar session lifecycle service
#[derive(Clone)]
pub struct MabarService {
    api: Arc<dyn BookingApi>,
    settings: Settings,
}

impl MabarService {
    pub fn new(api: Arc<dyn BookingApi>, settings: Settings) -> Self {
        Self { api, settings }
    }

    /// Advisory settlement window for the funding booking, in minutes.
    ///
    /// Hosts get a longer window than individual bookings; the constant is
    /// separate configuration, not derived from the individual window.
    pub fn funding_settlement_minutes(&self) -> i64 {
        self.settings.settlement.session_funding_minutes
    }

    /// Create a session together with its funding booking.
    ///
    /// The returned funding booking still has to be paid by the host before
    /// the session opens for participants.
    pub async fn create_session(
        &self,
        funding: CreateBookingRequest,
        request: CreateMabarSessionRequest,
    ) -> Result<CreatedSession> {
        self.validate_session_request(&request)?;

        let created = self.api.create_mabar_session(funding, request).await?;
        info!(
            session_id = created.session.id,
            funding_invoice = %created.funding.invoice,
            "Mabar session created, awaiting host payment"
        );
        Ok(created)
    }

    /// Fetch a session together with its derived status.
    ///
    /// The status is computed from a fresh funding-booking fetch, never
    /// stored or cached.
    pub async fn fetch_with_status(
        &self,
        session_id: i64,
    ) -> Result<(MabarSession, MabarSessionStatus)> {
        let session = self.api.get_session(session_id).await?;
        let funding = self.api.get_booking(&session.funding_invoice).await?;
        let status = derived_status(funding.booking.status);
        debug!(session_id = session_id, status = ?status, "Fetched session with derived status");
        Ok((session, status))
    }

    /// Host-side edit; allowed any time before the session is void and never
    /// touching the funding booking.
    pub async fn update_session(
        &self,
        session_id: i64,
        request: UpdateMabarSessionRequest,
    ) -> Result<MabarSession> {
        let (_, status) = self.fetch_with_status(session_id).await?;
        if !is_editable(status) {
            return Err(CourtBuddyError::SessionNotJoinable {
                session_id,
                reason: "session is void".to_string(),
            });
        }

        if let Some(slots_total) = request.slots_total {
            if slots_total < 1 {
                return Err(CourtBuddyError::Validation(
                    "Session must have at least one seat".to_string(),
                ));
            }
        }

        let session = self.api.update_session(session_id, request).await?;
        log_session_event(session_id, "updated", None, None);
        Ok(session)
    }

    /// Host-initiated hard stop.
    ///
    /// Participants who already paid must be notified out-of-band; the
    /// admitted roster is logged here so the caller can drive that.
    pub async fn delete_session(&self, session_id: i64) -> Result<()> {
        let session = self.api.get_session(session_id).await?;
        let admitted = session.admitted_count();
        if admitted > 0 {
            warn!(
                session_id = session_id,
                admitted = admitted,
                "Deleting session with admitted participants; notification required"
            );
        }

        self.api.delete_session(session_id).await?;
        log_session_event(session_id, "deleted", None, Some("host hard stop"));
        Ok(())
    }

    /// Self-service join request.
    ///
    /// Joinability and capacity are pre-checked against fresh state for fast
    /// feedback; the server remains the arbiter and may still answer
    /// `SessionFull` when a concurrent claim wins the last seat.
    pub async fn join(&self, session_id: i64, request: JoinSessionRequest) -> Result<Participant> {
        let (session, status) = self.fetch_with_status(session_id).await?;

        if !is_joinable(status) {
            return Err(CourtBuddyError::SessionNotJoinable {
                session_id,
                reason: format!("session is {}", status.label().to_lowercase()),
            });
        }

        if session.is_full() {
            return Err(CourtBuddyError::SessionFull {
                session_id,
                slots_total: session.slots_total,
            });
        }

        let participant = self.api.join_session(session_id, request).await?;
        log_session_event(session_id, "join_requested", Some(participant.id), None);
        Ok(participant)
    }

    /// Attach payment proof to a pending seat claim, moving it to review
    pub async fn upload_proof(
        &self,
        participant_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Participant> {
        if bytes.is_empty() {
            return Err(CourtBuddyError::Validation(
                "Payment proof file is empty".to_string(),
            ));
        }

        let participant = self
            .api
            .upload_payment_proof(participant_id, file_name, bytes)
            .await?;
        log_session_event(
            participant.session_id,
            "proof_uploaded",
            Some(participant_id),
            None,
        );
        Ok(participant)
    }

    /// Host approval of a seat claim.
    ///
    /// A self-service joiner on a paid session cannot be approved without
    /// uploaded proof, and approval respects capacity even if the roster
    /// changed since the host's screen loaded.
    pub async fn approve(&self, participant_id: i64) -> Result<Participant> {
        let pending = self.api.get_participant(participant_id).await?;
        let (session, _) = self.fetch_with_status(pending.session_id).await?;

        if !pending.is_approvable(session.requires_prepayment()) {
            if pending.status.is_admitted() || pending.status.is_terminal() {
                return Err(CourtBuddyError::InvalidStateTransition {
                    from: pending.status.to_string(),
                    to: "approved".to_string(),
                });
            }
            return Err(CourtBuddyError::ProofRequired { participant_id });
        }

        if session.is_full() {
            return Err(CourtBuddyError::SessionFull {
                session_id: session.id,
                slots_total: session.slots_total,
            });
        }

        let participant = self.api.approve_participant(participant_id).await?;
        log_session_event(participant.session_id, "approved", Some(participant_id), None);
        Ok(participant)
    }

    /// Host rejection; keeps the record with a terminal negative status and
    /// frees the seat
    pub async fn reject(&self, participant_id: i64) -> Result<Participant> {
        let participant = self.api.reject_participant(participant_id).await?;
        log_session_event(participant.session_id, "rejected", Some(participant_id), None);
        Ok(participant)
    }

    /// Joiner self-cancellation from any non-terminal state; frees the seat
    pub async fn cancel_participation(&self, participant_id: i64) -> Result<Participant> {
        let participant = self.api.cancel_participation(participant_id).await?;
        log_session_event(participant.session_id, "cancelled", Some(participant_id), None);
        Ok(participant)
    }

    /// Host removal of the participant record itself, any status.
    ///
    /// Distinct from rejection: no record survives.
    pub async fn delete_participant(&self, participant_id: i64) -> Result<()> {
        self.api.delete_participant(participant_id).await?;
        info!(participant_id = participant_id, "Participant record deleted by host");
        Ok(())
    }

    /// Host-entered guest seat: admitted immediately, no self-service steps.
    ///
    /// Capacity still applies; a guest cannot overbook the roster.
    pub async fn add_guest(&self, session_id: i64, name: &str) -> Result<Participant> {
        if name.trim().is_empty() {
            return Err(CourtBuddyError::Validation(
                "Guest name is required".to_string(),
            ));
        }

        let (session, status) = self.fetch_with_status(session_id).await?;
        if status == MabarSessionStatus::Void {
            return Err(CourtBuddyError::SessionNotJoinable {
                session_id,
                reason: "session is void".to_string(),
            });
        }
        if session.is_full() {
            return Err(CourtBuddyError::SessionFull {
                session_id,
                slots_total: session.slots_total,
            });
        }

        let participant = self.api.add_guest_participant(session_id, name).await?;
        log_session_event(session_id, "guest_added", Some(participant.id), None);
        Ok(participant)
    }

    fn validate_session_request(&self, request: &CreateMabarSessionRequest) -> Result<()> {
        if request.title.trim().is_empty() {
            return Err(CourtBuddyError::Validation(
                "Session title is required".to_string(),
            ));
        }
        if request.slots_total < 1 {
            return Err(CourtBuddyError::Validation(
                "Session must have at least one seat".to_string(),
            ));
        }
        if request.price_per_slot < 0 {
            return Err(CourtBuddyError::Validation(
                "Seat price cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
