//! Mabar (play-together) session model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::models::participant::Participant;

/// Kind of hosted group session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MabarSessionType {
    Open,
    Tournament,
    TeamChallenge,
}

impl MabarSessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MabarSessionType::Open => "open",
            MabarSessionType::Tournament => "tournament",
            MabarSessionType::TeamChallenge => "team_challenge",
        }
    }

    /// Human label for this session type
    pub fn label(&self) -> &'static str {
        match self {
            MabarSessionType::Open => "Open play",
            MabarSessionType::Tournament => "Tournament",
            MabarSessionType::TeamChallenge => "Team challenge",
        }
    }
}

impl fmt::Display for MabarSessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MabarSessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(MabarSessionType::Open),
            "tournament" => Ok(MabarSessionType::Tournament),
            "team_challenge" => Ok(MabarSessionType::TeamChallenge),
            other => Err(format!("unknown session type: {}", other)),
        }
    }
}

/// Visible status of a mabar session.
///
/// Never stored: always derived from the funding booking's status (see
/// `lifecycle::session::derived_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MabarSessionStatus {
    /// Funding booking unpaid; not joinable yet
    AwaitingHostPayment,
    /// Funding booking active; open for participants up to capacity
    Open,
    /// Funding booking failed, cancelled or expired; rejects new joins
    Void,
}

impl MabarSessionStatus {
    /// Human label for this status
    pub fn label(&self) -> &'static str {
        match self {
            MabarSessionStatus::AwaitingHostPayment => "Awaiting host payment",
            MabarSessionStatus::Open => "Open",
            MabarSessionStatus::Void => "Cancelled",
        }
    }
}

/// A hosted group activity funded by one booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MabarSession {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub session_type: MabarSessionType,
    pub slots_total: i32,
    pub price_per_slot: i64,
    /// Host-defined off-platform settlement instructions
    pub payment_instructions: String,
    pub cover_image_url: Option<String>,
    /// Invoice of the funding booking the host must pay
    pub funding_invoice: String,
    pub host_user_id: i64,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
}

impl MabarSession {
    /// Number of participants currently counting against capacity
    pub fn admitted_count(&self) -> usize {
        self.participants.iter().filter(|p| p.status.is_admitted()).count()
    }

    /// Whether a new admission would exceed `slots_total`
    pub fn is_full(&self) -> bool {
        self.admitted_count() >= self.slots_total as usize
    }

    /// Whether this session collects seat payments before approval
    pub fn requires_prepayment(&self) -> bool {
        self.price_per_slot > 0
    }
}

/// Request payload for creating a mabar session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMabarSessionRequest {
    pub title: String,
    pub description: Option<String>,
    pub session_type: MabarSessionType,
    pub slots_total: i32,
    pub price_per_slot: i64,
    pub payment_instructions: String,
    pub cover_image_url: Option<String>,
}

/// Host-side session edits; untouched fields stay None
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMabarSessionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub session_type: Option<MabarSessionType>,
    pub slots_total: Option<i32>,
    pub price_per_slot: Option<i64>,
    pub payment_instructions: Option<String>,
    pub cover_image_url: Option<String>,
}

/// Remote response to a successful session creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session: MabarSession,
    /// The funding booking the host still has to pay
    pub funding: crate::models::booking::CreatedBooking,
}
