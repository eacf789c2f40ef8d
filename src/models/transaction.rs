//! Payment transaction model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Status of the payment record attached to a booking.
///
/// Mutated exclusively by gateway callbacks or server-side expiry; the client
/// only displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Expired,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Expired => "expired",
        }
    }

    /// Human label for this status
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Waiting for confirmation",
            TransactionStatus::Success => "Paid",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "success" => Ok(TransactionStatus::Success),
            "failed" => Ok(TransactionStatus::Failed),
            "expired" => Ok(TransactionStatus::Expired),
            other => Err(format!("unknown transaction status: {}", other)),
        }
    }
}

/// Payment record attached 1:1 to a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Gateway-issued widget token
    pub token: String,
    pub gateway: String,
    pub amount: i64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
