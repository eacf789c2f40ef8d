//! In-memory stand-in for the remote booking arbiter
//!
//! Implements the `BookingApi` contract with real server-side semantics:
//! slot conflicts are serialized, seat capacity is enforced, and unpaid
//! bookings expire once the manual clock passes their settlement deadline.
//! Expiry is applied lazily on every call, mirroring a server that sweeps on
//! read, so tests drive time with `advance_minutes` and observe the outcome
//! through the public API alone.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use CourtBuddy::api::BookingApi;
use CourtBuddy::lifecycle;
use CourtBuddy::models::booking::{
    Booking, BookingDetail, BookingStatus, CreateBookingRequest, CreatedBooking,
};
use CourtBuddy::models::participant::{
    AdmissionStatus, JoinSessionRequest, Participant, ParticipantIdentity,
};
use CourtBuddy::models::session::{
    CreateMabarSessionRequest, CreatedSession, MabarSession, UpdateMabarSessionRequest,
};
use CourtBuddy::models::slot::Field;
use CourtBuddy::models::transaction::{Transaction, TransactionStatus};
use CourtBuddy::utils::errors::{CourtBuddyError, Result};

struct ServerState {
    now: DateTime<Utc>,
    fields: HashMap<i64, Field>,
    bookings: HashMap<String, (Booking, Transaction)>,
    sessions: HashMap<i64, MabarSession>,
    next_invoice: u64,
    next_id: i64,
}

/// Manual-clock fake of the remote booking system
pub struct FakeCourtApi {
    state: Mutex<ServerState>,
    individual_minutes: i64,
    funding_minutes: i64,
}

impl FakeCourtApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(ServerState {
                now: Utc::now(),
                fields: HashMap::new(),
                bookings: HashMap::new(),
                sessions: HashMap::new(),
                next_invoice: 1,
                next_id: 1,
            }),
            individual_minutes: 15,
            funding_minutes: 60,
        })
    }

    pub fn add_field(&self, field: Field) {
        let mut state = self.state.lock().unwrap();
        state.fields.insert(field.id, field);
    }

    /// Move the server clock forward; due settlements expire on the next call
    pub fn advance_minutes(&self, minutes: i64) {
        let mut state = self.state.lock().unwrap();
        state.now += Duration::minutes(minutes);
    }

    /// Gateway server-to-server settlement for the booking behind a token
    pub fn settle_token(&self, token: &str) {
        let mut state = self.state.lock().unwrap();
        Self::sweep_expiry(&mut state);
        let invoice = state
            .bookings
            .iter()
            .find(|(_, (_, tx))| tx.token == token)
            .map(|(invoice, _)| invoice.clone());
        if let Some(invoice) = invoice {
            let now = state.now;
            let (booking, tx) = state.bookings.get_mut(&invoice).unwrap();
            if booking.status == BookingStatus::WaitingPayment {
                lifecycle::transition_booking(booking, BookingStatus::Active).unwrap();
                tx.status = TransactionStatus::Success;
                tx.updated_at = now;
            }
        }
    }

    /// Gateway failure callback for the booking behind a token
    pub fn fail_token(&self, token: &str) {
        let mut state = self.state.lock().unwrap();
        let invoice = state
            .bookings
            .iter()
            .find(|(_, (_, tx))| tx.token == token)
            .map(|(invoice, _)| invoice.clone());
        if let Some(invoice) = invoice {
            let now = state.now;
            let (booking, tx) = state.bookings.get_mut(&invoice).unwrap();
            if booking.status == BookingStatus::WaitingPayment {
                lifecycle::transition_booking(booking, BookingStatus::Failed).unwrap();
                tx.status = TransactionStatus::Failed;
                tx.updated_at = now;
            }
        }
    }

    /// Direct settlement by invoice (host paying a funding booking in tests)
    pub fn settle_invoice(&self, invoice: &str) {
        let token = {
            let state = self.state.lock().unwrap();
            state.bookings.get(invoice).map(|(_, tx)| tx.token.clone())
        };
        if let Some(token) = token {
            self.settle_token(&token);
        }
    }

    fn sweep_expiry(state: &mut ServerState) {
        let now = state.now;
        for (booking, tx) in state.bookings.values_mut() {
            if booking.status == BookingStatus::WaitingPayment {
                if let Some(expires_at) = booking.expires_at {
                    if expires_at <= now {
                        lifecycle::transition_booking(booking, BookingStatus::Expired).unwrap();
                        tx.status = TransactionStatus::Expired;
                        tx.updated_at = now;
                    }
                }
            }
        }
    }

    fn occupied(state: &ServerState, field_id: i64, date: NaiveDate) -> Vec<String> {
        let mut slots: Vec<String> = state
            .bookings
            .values()
            .filter(|(b, _)| b.field_id == field_id && b.date == date && b.status.holds_slots())
            .flat_map(|(b, _)| b.slots.iter().cloned())
            .collect();
        slots.sort();
        slots.dedup();
        slots
    }

    fn insert_booking(
        state: &mut ServerState,
        request: CreateBookingRequest,
        settlement_minutes: i64,
        mabar_session_id: Option<i64>,
    ) -> Result<CreatedBooking> {
        let field = state
            .fields
            .get(&request.field_id)
            .ok_or(CourtBuddyError::FieldNotFound { field_id: request.field_id })?;

        let occupied = Self::occupied(state, request.field_id, request.date);
        if let Some(slot) = request.slots.iter().find(|s| occupied.contains(s)) {
            return Err(CourtBuddyError::SlotConflict {
                field_id: request.field_id,
                date: request.date,
                detail: format!("{} already held", slot),
            });
        }

        let total_price = field.price_per_hour * request.slots.len() as i64;
        let invoice = format!("INV-{:06}", state.next_invoice);
        let token = format!("TOK-{:06}", state.next_invoice);
        state.next_invoice += 1;

        let booking = Booking {
            invoice: invoice.clone(),
            owner: request.owner,
            field_id: request.field_id,
            date: request.date,
            slots: request.slots,
            total_price,
            status: BookingStatus::WaitingPayment,
            mabar_session_id,
            created_at: state.now,
            expires_at: Some(state.now + Duration::minutes(settlement_minutes)),
        };
        let transaction = Transaction {
            token: token.clone(),
            gateway: "snap".to_string(),
            amount: total_price,
            status: TransactionStatus::Pending,
            created_at: state.now,
            updated_at: state.now,
        };
        state.bookings.insert(invoice.clone(), (booking, transaction));

        Ok(CreatedBooking { invoice, gateway_token: token })
    }

    fn participant_mut<'a>(
        state: &'a mut ServerState,
        participant_id: i64,
    ) -> Result<&'a mut Participant> {
        state
            .sessions
            .values_mut()
            .flat_map(|s| s.participants.iter_mut())
            .find(|p| p.id == participant_id)
            .ok_or(CourtBuddyError::ParticipantNotFound { participant_id })
    }
}

#[async_trait]
impl BookingApi for FakeCourtApi {
    async fn get_field(&self, field_id: i64) -> Result<Field> {
        let state = self.state.lock().unwrap();
        state
            .fields
            .get(&field_id)
            .cloned()
            .ok_or(CourtBuddyError::FieldNotFound { field_id })
    }

    async fn get_occupied_slots(&self, field_id: i64, date: NaiveDate) -> Result<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        Self::sweep_expiry(&mut state);
        if !state.fields.contains_key(&field_id) {
            return Err(CourtBuddyError::FieldNotFound { field_id });
        }
        Ok(Self::occupied(&state, field_id, date))
    }

    async fn create_booking(&self, request: CreateBookingRequest) -> Result<CreatedBooking> {
        let mut state = self.state.lock().unwrap();
        Self::sweep_expiry(&mut state);
        let minutes = self.individual_minutes;
        Self::insert_booking(&mut state, request, minutes, None)
    }

    async fn get_booking(&self, invoice: &str) -> Result<BookingDetail> {
        let mut state = self.state.lock().unwrap();
        Self::sweep_expiry(&mut state);
        state
            .bookings
            .get(invoice)
            .map(|(booking, transaction)| BookingDetail {
                booking: booking.clone(),
                transaction: transaction.clone(),
            })
            .ok_or(CourtBuddyError::BookingNotFound { invoice: invoice.to_string() })
    }

    async fn cancel_booking(&self, invoice: &str) -> Result<Booking> {
        let mut state = self.state.lock().unwrap();
        Self::sweep_expiry(&mut state);
        let (booking, tx) = state
            .bookings
            .get_mut(invoice)
            .ok_or(CourtBuddyError::BookingNotFound { invoice: invoice.to_string() })?;
        lifecycle::transition_booking(booking, BookingStatus::Cancelled)?;
        tx.status = TransactionStatus::Failed;
        Ok(booking.clone())
    }

    async fn create_mabar_session(
        &self,
        funding: CreateBookingRequest,
        session: CreateMabarSessionRequest,
    ) -> Result<CreatedSession> {
        let mut state = self.state.lock().unwrap();
        Self::sweep_expiry(&mut state);

        let host_user_id = match &funding.owner {
            CourtBuddy::models::booking::BookingOwner::Registered { user_id } => *user_id,
            CourtBuddy::models::booking::BookingOwner::Guest { .. } => {
                return Err(CourtBuddyError::Validation(
                    "Session host must be a registered user".to_string(),
                ))
            }
        };

        let session_id = state.next_id;
        state.next_id += 1;

        let minutes = self.funding_minutes;
        let created = Self::insert_booking(&mut state, funding, minutes, Some(session_id))?;

        let now = state.now;
        let mabar = MabarSession {
            id: session_id,
            title: session.title,
            description: session.description,
            session_type: session.session_type,
            slots_total: session.slots_total,
            price_per_slot: session.price_per_slot,
            payment_instructions: session.payment_instructions,
            cover_image_url: session.cover_image_url,
            funding_invoice: created.invoice.clone(),
            host_user_id,
            participants: Vec::new(),
            created_at: now,
        };
        state.sessions.insert(session_id, mabar.clone());

        Ok(CreatedSession { session: mabar, funding: created })
    }

    async fn get_session(&self, session_id: i64) -> Result<MabarSession> {
        let mut state = self.state.lock().unwrap();
        Self::sweep_expiry(&mut state);
        state
            .sessions
            .get(&session_id)
            .cloned()
            .ok_or(CourtBuddyError::SessionNotFound { session_id })
    }

    async fn update_session(
        &self,
        session_id: i64,
        request: UpdateMabarSessionRequest,
    ) -> Result<MabarSession> {
        let mut state = self.state.lock().unwrap();
        let session = state
            .sessions
            .get_mut(&session_id)
            .ok_or(CourtBuddyError::SessionNotFound { session_id })?;

        if let Some(title) = request.title {
            session.title = title;
        }
        if let Some(description) = request.description {
            session.description = Some(description);
        }
        if let Some(session_type) = request.session_type {
            session.session_type = session_type;
        }
        if let Some(slots_total) = request.slots_total {
            session.slots_total = slots_total;
        }
        if let Some(price_per_slot) = request.price_per_slot {
            session.price_per_slot = price_per_slot;
        }
        if let Some(payment_instructions) = request.payment_instructions {
            session.payment_instructions = payment_instructions;
        }
        if let Some(cover_image_url) = request.cover_image_url {
            session.cover_image_url = Some(cover_image_url);
        }

        Ok(session.clone())
    }

    async fn delete_session(&self, session_id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .sessions
            .remove(&session_id)
            .map(|_| ())
            .ok_or(CourtBuddyError::SessionNotFound { session_id })
    }

    async fn get_participant(&self, participant_id: i64) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();
        Ok(Self::participant_mut(&mut state, participant_id)?.clone())
    }

    async fn join_session(
        &self,
        session_id: i64,
        request: JoinSessionRequest,
    ) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();
        Self::sweep_expiry(&mut state);

        let funding_status = {
            let session = state
                .sessions
                .get(&session_id)
                .ok_or(CourtBuddyError::SessionNotFound { session_id })?;
            state
                .bookings
                .get(&session.funding_invoice)
                .map(|(b, _)| b.status)
                .ok_or(CourtBuddyError::BookingNotFound {
                    invoice: session.funding_invoice.clone(),
                })?
        };

        let status = lifecycle::derived_status(funding_status);
        if !lifecycle::session::is_joinable(status) {
            return Err(CourtBuddyError::SessionNotJoinable {
                session_id,
                reason: format!("session is {}", status.label().to_lowercase()),
            });
        }

        let participant_id = state.next_id;
        state.next_id += 1;
        let now = state.now;

        let session = state.sessions.get_mut(&session_id).unwrap();
        if session
            .participants
            .iter()
            .any(|p| !p.status.is_terminal() && matches!(&p.identity, ParticipantIdentity::Registered { user_id, .. } if *user_id == request.user_id))
        {
            return Err(CourtBuddyError::Validation(
                "Already joined this session".to_string(),
            ));
        }
        if session.is_full() {
            return Err(CourtBuddyError::SessionFull {
                session_id,
                slots_total: session.slots_total,
            });
        }

        let participant = Participant {
            id: participant_id,
            session_id,
            identity: ParticipantIdentity::Registered {
                user_id: request.user_id,
                name: request.name,
            },
            status: lifecycle::admission::initial_status(session.requires_prepayment()),
            payment_proof_url: None,
            joined_at: now,
        };
        session.participants.push(participant.clone());
        Ok(participant)
    }

    async fn upload_payment_proof(
        &self,
        participant_id: i64,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();
        let participant = Self::participant_mut(&mut state, participant_id)?;
        participant.payment_proof_url = Some(format!("uploads/{}", file_name));
        if participant.status == AdmissionStatus::WaitingPayment {
            lifecycle::transition_admission(participant, AdmissionStatus::AwaitingApproval)?;
        }
        Ok(participant.clone())
    }

    async fn approve_participant(&self, participant_id: i64) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();

        let (session_id, requires_prepayment, is_full) = {
            let participant = Self::participant_mut(&mut state, participant_id)?.clone();
            let session = state.sessions.get(&participant.session_id).unwrap();
            (session.id, session.requires_prepayment(), session.is_full())
        };

        let participant = Self::participant_mut(&mut state, participant_id)?;
        if !participant.is_approvable(requires_prepayment) {
            if participant.status.is_admitted() || participant.status.is_terminal() {
                return Err(CourtBuddyError::InvalidStateTransition {
                    from: participant.status.to_string(),
                    to: AdmissionStatus::Approved.to_string(),
                });
            }
            return Err(CourtBuddyError::ProofRequired { participant_id });
        }
        if is_full {
            let slots_total = state.sessions.get(&session_id).unwrap().slots_total;
            return Err(CourtBuddyError::SessionFull { session_id, slots_total });
        }

        let participant = Self::participant_mut(&mut state, participant_id)?;
        lifecycle::transition_admission(participant, AdmissionStatus::Approved)?;
        Ok(participant.clone())
    }

    async fn reject_participant(&self, participant_id: i64) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();
        let participant = Self::participant_mut(&mut state, participant_id)?;
        lifecycle::transition_admission(participant, AdmissionStatus::Rejected)?;
        Ok(participant.clone())
    }

    async fn cancel_participation(&self, participant_id: i64) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();
        let participant = Self::participant_mut(&mut state, participant_id)?;
        lifecycle::transition_admission(participant, AdmissionStatus::Cancelled)?;
        Ok(participant.clone())
    }

    async fn delete_participant(&self, participant_id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        for session in state.sessions.values_mut() {
            if let Some(pos) = session.participants.iter().position(|p| p.id == participant_id) {
                session.participants.remove(pos);
                return Ok(());
            }
        }
        Err(CourtBuddyError::ParticipantNotFound { participant_id })
    }

    async fn add_guest_participant(&self, session_id: i64, name: &str) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();
        let participant_id = state.next_id;
        state.next_id += 1;
        let now = state.now;

        let session = state
            .sessions
            .get_mut(&session_id)
            .ok_or(CourtBuddyError::SessionNotFound { session_id })?;
        if session.is_full() {
            return Err(CourtBuddyError::SessionFull {
                session_id,
                slots_total: session.slots_total,
            });
        }

        let participant = Participant {
            id: participant_id,
            session_id,
            identity: ParticipantIdentity::Guest { name: name.to_string() },
            status: lifecycle::admission::guest_status(),
            payment_proof_url: None,
            joined_at: now,
        };
        session.participants.push(participant.clone());
        Ok(participant)
    }
}
