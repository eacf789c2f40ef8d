//! Payment gateway orchestration
//!
//! Bridges the widget's four terminal outcomes into booking lifecycle
//! transitions. All outcomes funnel through one resolution function so the
//! booking status stays the single source of truth no matter which UI
//! surface opened the widget.
//!
//! The central behavioral contract lives here: closing the widget is not
//! cancelling. A dismissed checkout leaves the booking in waiting_payment
//! with its slots held, and the same invoice can resume payment until the
//! settlement window lapses server-side.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::BookingApi;
use crate::config::settings::Settings;
use crate::gateway::{PaymentOutcome, PaymentWidget};
use crate::models::booking::BookingStatus;
use crate::utils::errors::{CourtBuddyError, Result};
use crate::utils::logging::log_payment_event;

/// What the caller should present after a payment attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentResolution {
    /// Booking is paid; navigate to the confirmation view for this invoice
    Confirmed { invoice: String },
    /// Payment submitted, gateway confirmation pending; keep polling status
    AwaitingConfirmation { invoice: String },
    /// Gateway-side failure; the reservation is untouched and retry is allowed
    RetryAvailable { invoice: String, reason: String },
    /// Widget dismissed without resolution; offer "resume payment" for this
    /// invoice while the settlement window lasts
    ResumeLater { invoice: String },
}

/// Orchestrates payment widget round trips for bookings
#[derive(Clone)]
pub struct PaymentOrchestrator {
    api: Arc<dyn BookingApi>,
    widget: Arc<dyn PaymentWidget>,
    settings: Settings,
}

impl PaymentOrchestrator {
    pub fn new(
        api: Arc<dyn BookingApi>,
        widget: Arc<dyn PaymentWidget>,
        settings: Settings,
    ) -> Self {
        Self { api, widget, settings }
    }

    /// Open (or resume) payment for an invoice.
    ///
    /// Re-invoking for an already-active booking is a safe no-op that
    /// resolves to `Confirmed` without touching the widget, so stale "resume
    /// payment" affordances cannot double-charge. The current status is
    /// always fetched fresh before the widget opens.
    pub async fn start_payment(&self, invoice: &str) -> Result<PaymentResolution> {
        let detail = self.api.get_booking(invoice).await?;
        debug!(
            invoice = invoice,
            status = %detail.booking.status,
            gateway = %self.settings.gateway.environment,
            "Starting payment flow"
        );

        match detail.booking.status {
            BookingStatus::Active | BookingStatus::Completed => {
                info!(invoice = invoice, "Booking already paid; skipping widget");
                Ok(PaymentResolution::Confirmed { invoice: invoice.to_string() })
            }
            BookingStatus::Expired => {
                Err(CourtBuddyError::BookingExpired { invoice: invoice.to_string() })
            }
            BookingStatus::Failed | BookingStatus::Cancelled => {
                Err(CourtBuddyError::InvalidStateTransition {
                    from: detail.booking.status.to_string(),
                    to: BookingStatus::WaitingPayment.to_string(),
                })
            }
            BookingStatus::Created | BookingStatus::WaitingPayment => {
                let outcome = self.widget.open(&detail.transaction.token).await?;
                self.resolve_outcome(invoice, outcome).await
            }
        }
    }

    /// The single point where widget outcomes become lifecycle effects.
    async fn resolve_outcome(
        &self,
        invoice: &str,
        outcome: PaymentOutcome,
    ) -> Result<PaymentResolution> {
        log_payment_event(invoice, outcome.as_str(), !matches!(outcome, PaymentOutcome::Error { .. }));

        match outcome {
            PaymentOutcome::Success => {
                // The gateway notifies the server directly; re-fetch so the
                // confirmation view renders authoritative state. Repeated
                // success callbacks land here as already-active and stay
                // idempotent.
                let detail = self.api.get_booking(invoice).await?;
                match detail.booking.status {
                    BookingStatus::Active | BookingStatus::Completed => {
                        info!(invoice = invoice, "Payment confirmed; booking active");
                        Ok(PaymentResolution::Confirmed { invoice: invoice.to_string() })
                    }
                    // Server-side settlement can lag the widget callback
                    _ => Ok(PaymentResolution::AwaitingConfirmation {
                        invoice: invoice.to_string(),
                    }),
                }
            }
            PaymentOutcome::Pending => {
                info!(invoice = invoice, "Payment pending gateway confirmation");
                Ok(PaymentResolution::AwaitingConfirmation { invoice: invoice.to_string() })
            }
            PaymentOutcome::Error { message } => {
                warn!(invoice = invoice, reason = %message, "Gateway error; booking remains payable");
                Ok(PaymentResolution::RetryAvailable {
                    invoice: invoice.to_string(),
                    reason: message,
                })
            }
            PaymentOutcome::Closed => {
                // Dismissal is not cancellation: the reservation stays live
                // until explicit cancellation or server-side expiry.
                info!(invoice = invoice, "Widget closed without resolution; resume remains available");
                Ok(PaymentResolution::ResumeLater { invoice: invoice.to_string() })
            }
        }
    }
}
