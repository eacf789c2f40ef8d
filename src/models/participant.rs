//! Session participant model and admission status

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Admission status of one seat claim on a mabar session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    /// Pre-payment branch: seat price must be settled before review
    WaitingPayment,
    AwaitingApproval,
    Approved,
    Rejected,
    Cancelled,
}

impl AdmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionStatus::WaitingPayment => "waiting_payment",
            AdmissionStatus::AwaitingApproval => "awaiting_approval",
            AdmissionStatus::Approved => "approved",
            AdmissionStatus::Rejected => "rejected",
            AdmissionStatus::Cancelled => "cancelled",
        }
    }

    /// Whether this seat counts against session capacity
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionStatus::Approved)
    }

    /// Whether this status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, AdmissionStatus::Rejected | AdmissionStatus::Cancelled)
    }

    /// Human label for this status
    pub fn label(&self) -> &'static str {
        match self {
            AdmissionStatus::WaitingPayment => "Waiting for payment",
            AdmissionStatus::AwaitingApproval => "Waiting for approval",
            AdmissionStatus::Approved => "Approved",
            AdmissionStatus::Rejected => "Rejected",
            AdmissionStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting_payment" => Ok(AdmissionStatus::WaitingPayment),
            "awaiting_approval" => Ok(AdmissionStatus::AwaitingApproval),
            "approved" => Ok(AdmissionStatus::Approved),
            "rejected" => Ok(AdmissionStatus::Rejected),
            "cancelled" => Ok(AdmissionStatus::Cancelled),
            other => Err(format!("unknown admission status: {}", other)),
        }
    }
}

/// Who claims the seat: a registered user or a host-entered guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParticipantIdentity {
    Registered { user_id: i64, name: String },
    /// Host-entered; no self-service path
    Guest { name: String },
}

impl ParticipantIdentity {
    pub fn is_guest(&self) -> bool {
        matches!(self, ParticipantIdentity::Guest { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            ParticipantIdentity::Registered { name, .. } => name,
            ParticipantIdentity::Guest { name } => name,
        }
    }
}

/// One seat claim on a mabar session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub session_id: i64,
    pub identity: ParticipantIdentity,
    pub status: AdmissionStatus,
    pub payment_proof_url: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Whether approval is currently allowed for this participant.
    ///
    /// Guests are vouched for by the host; self-service joiners on a paid
    /// session must have uploaded payment proof first.
    pub fn is_approvable(&self, requires_prepayment: bool) -> bool {
        if self.status.is_terminal() || self.status.is_admitted() {
            return false;
        }
        if self.identity.is_guest() {
            return true;
        }
        !requires_prepayment || self.payment_proof_url.is_some()
    }
}

/// Request payload for a self-service join
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinSessionRequest {
    pub user_id: i64,
    pub name: String,
}
