//! Booking service
//!
//! Drives a booking from slot submission to a terminal state. The remote
//! system is the conflict arbiter: a conflict answer is authoritative and is
//! handed back to the caller for re-selection, never retried with the same
//! slot set.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::BookingApi;
use crate::config::settings::Settings;
use crate::models::booking::{
    Booking, BookingDetail, BookingOwner, CreateBookingRequest, CreatedBooking,
};
use crate::utils::errors::{CourtBuddyError, Result};
use crate::utils::helpers::is_valid_phone;

/// Booking lifecycle service
#[derive(Clone)]
pub struct BookingService {
    api: Arc<dyn BookingApi>,
    settings: Settings,
}

impl BookingService {
    pub fn new(api: Arc<dyn BookingApi>, settings: Settings) -> Self {
        Self { api, settings }
    }

    /// Advisory settlement window for individual bookings, in minutes.
    ///
    /// For countdown rendering only; the server owns the actual expiry.
    pub fn settlement_minutes(&self) -> i64 {
        self.settings.settlement.individual_minutes
    }

    /// Submit a slot selection and create a booking.
    ///
    /// Validation failures never reach the remote call. A `SlotConflict`
    /// answer means another booking won the slots first: the caller must
    /// re-resolve availability and let the user pick again.
    pub async fn create(&self, request: CreateBookingRequest) -> Result<CreatedBooking> {
        self.validate_request(&request)?;

        let request_id = Uuid::new_v4();
        debug!(
            request_id = %request_id,
            field_id = request.field_id,
            date = %request.date,
            slots = ?request.slots,
            "Submitting booking"
        );

        match self.api.create_booking(request).await {
            Ok(created) => {
                info!(request_id = %request_id, invoice = %created.invoice, "Booking created, awaiting payment");
                Ok(created)
            }
            Err(err @ CourtBuddyError::SlotConflict { .. }) => {
                warn!(request_id = %request_id, error = %err, "Slot conflict at submission; caller must re-select");
                Err(err)
            }
            Err(e) => Err(e),
        }
    }

    /// Authoritative booking state by invoice.
    ///
    /// Always a fresh fetch: a client-side countdown never decides whether a
    /// booking is still payable, this does.
    pub async fn refresh(&self, invoice: &str) -> Result<BookingDetail> {
        debug!(invoice = invoice, "Refreshing booking status");
        self.api.get_booking(invoice).await
    }

    /// Cancel a booking while it is still cancellable.
    ///
    /// The status check runs against fresh server state; cancelling an
    /// already-terminal booking is rejected as an invalid transition.
    pub async fn cancel(&self, invoice: &str) -> Result<Booking> {
        let detail = self.api.get_booking(invoice).await?;

        if !detail.booking.status.is_cancellable() {
            return Err(CourtBuddyError::InvalidStateTransition {
                from: detail.booking.status.to_string(),
                to: "cancelled".to_string(),
            });
        }

        let booking = self.api.cancel_booking(invoice).await?;
        info!(invoice = invoice, "Booking cancelled by owner");
        Ok(booking)
    }

    /// Create a fresh booking from an expired one's parameters.
    ///
    /// The expired booking itself is never resurrected; its slots may have
    /// been taken in the meantime, in which case the conflict surfaces here
    /// like any other submission.
    pub async fn rebook(&self, invoice: &str) -> Result<CreatedBooking> {
        let detail = self.api.get_booking(invoice).await?;

        if detail.booking.status != crate::models::booking::BookingStatus::Expired {
            return Err(CourtBuddyError::InvalidStateTransition {
                from: detail.booking.status.to_string(),
                to: "created".to_string(),
            });
        }

        info!(invoice = invoice, "Rebooking expired reservation as a fresh booking");
        self.create(CreateBookingRequest {
            field_id: detail.booking.field_id,
            date: detail.booking.date,
            slots: detail.booking.slots,
            owner: detail.booking.owner,
        })
        .await
    }

    fn validate_request(&self, request: &CreateBookingRequest) -> Result<()> {
        if request.slots.is_empty() {
            return Err(CourtBuddyError::Validation(
                "At least one slot must be selected".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for slot in &request.slots {
            if crate::utils::helpers::parse_slot_label(slot).is_none() {
                return Err(CourtBuddyError::Validation(format!(
                    "Invalid slot label: {}",
                    slot
                )));
            }
            if !seen.insert(slot) {
                return Err(CourtBuddyError::Validation(format!(
                    "Duplicate slot in selection: {}",
                    slot
                )));
            }
        }

        if let BookingOwner::Guest { name, phone } = &request.owner {
            if name.trim().is_empty() {
                return Err(CourtBuddyError::Validation(
                    "Guest name is required".to_string(),
                ));
            }
            if !is_valid_phone(phone) {
                return Err(CourtBuddyError::Validation(format!(
                    "Invalid phone number: {}",
                    phone
                )));
            }
        }

        Ok(())
    }
}
