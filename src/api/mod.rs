//! Remote booking API boundary
//!
//! The remote system is the authoritative arbiter for slots, bookings,
//! sessions and seats. This module defines the consumed contract as a trait
//! so services stay independent of the transport; `http.rs` provides the
//! production implementation over the platform's REST API.

pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::booking::{Booking, BookingDetail, CreateBookingRequest, CreatedBooking};
use crate::models::participant::{JoinSessionRequest, Participant};
use crate::models::session::{
    CreateMabarSessionRequest, CreatedSession, MabarSession, UpdateMabarSessionRequest,
};
use crate::models::slot::Field;
use crate::utils::errors::Result;

pub use http::HttpBookingApi;

/// Contract consumed from the remote booking system.
///
/// Every mutating call may be answered with a conflict
/// (`SlotConflict`/`SessionFull`); callers must re-resolve read state instead
/// of retrying verbatim or patching local collections.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Field metadata: schedule, blackouts, pricing (resolver inputs)
    async fn get_field(&self, field_id: i64) -> Result<Field>;

    /// Slot labels held by non-terminal bookings on (field, date)
    async fn get_occupied_slots(&self, field_id: i64, date: NaiveDate) -> Result<Vec<String>>;

    /// Create a booking; the slot set must still be free at commit time
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<CreatedBooking>;

    /// Booking plus its payment record, by invoice
    async fn get_booking(&self, invoice: &str) -> Result<BookingDetail>;

    /// Owner-initiated cancellation
    async fn cancel_booking(&self, invoice: &str) -> Result<Booking>;

    /// Create a session and its funding booking in one step
    async fn create_mabar_session(
        &self,
        funding: CreateBookingRequest,
        session: CreateMabarSessionRequest,
    ) -> Result<CreatedSession>;

    async fn get_session(&self, session_id: i64) -> Result<MabarSession>;

    async fn update_session(
        &self,
        session_id: i64,
        request: UpdateMabarSessionRequest,
    ) -> Result<MabarSession>;

    /// Hard delete of a session (host-initiated)
    async fn delete_session(&self, session_id: i64) -> Result<()>;

    /// One seat claim by id
    async fn get_participant(&self, participant_id: i64) -> Result<Participant>;

    /// Self-service join; seat capacity is arbitrated server-side
    async fn join_session(
        &self,
        session_id: i64,
        request: JoinSessionRequest,
    ) -> Result<Participant>;

    /// Attach payment proof to a pending seat claim
    async fn upload_payment_proof(
        &self,
        participant_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Participant>;

    async fn approve_participant(&self, participant_id: i64) -> Result<Participant>;

    async fn reject_participant(&self, participant_id: i64) -> Result<Participant>;

    /// Joiner-initiated cancellation of their own seat claim
    async fn cancel_participation(&self, participant_id: i64) -> Result<Participant>;

    /// Host-initiated removal of the record itself, any status
    async fn delete_participant(&self, participant_id: i64) -> Result<()>;

    /// Host-entered guest; enters admitted without self-service steps
    async fn add_guest_participant(&self, session_id: i64, name: &str) -> Result<Participant>;
}
