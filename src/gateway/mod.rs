//! Payment gateway widget boundary
//!
//! The third-party widget is an opaque UI takeover whose only signal channel
//! back is one of four terminal outcomes. Implementations wrap the actual
//! widget (or a scripted stand-in under test); the orchestrator in
//! `services::payment` is the single place outcomes are turned into booking
//! lifecycle transitions.

use async_trait::async_trait;

use crate::utils::errors::Result;

/// Terminal outcome of one widget invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Gateway confirmed the payment
    Success,
    /// Payment submitted, confirmation still pending on the gateway side
    Pending,
    /// Gateway-side failure; the booking is untouched and retry is allowed
    Error { message: String },
    /// User dismissed the widget without completing payment.
    ///
    /// This is NOT a cancellation: the booking and its held slots stay live
    /// until explicit cancellation or server-side expiry.
    Closed,
}

impl PaymentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "success",
            PaymentOutcome::Pending => "pending",
            PaymentOutcome::Error { .. } => "error",
            PaymentOutcome::Closed => "closed",
        }
    }
}

/// The payment widget contract: open with a gateway token, get one outcome back
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    async fn open(&self, token: &str) -> Result<PaymentOutcome>;
}
