//! Blood request lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a blood request.
///
/// `Pending` is the only non-terminal state: every other state is final and
/// no transition out of it is permitted. `Accepted` is part of the declared
/// state space but no operation currently transitions into it; it is
/// reserved for an explicit donor-accept flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting action by either party.
    Pending,
    /// Accepted by the donor (reserved; no transition currently exercised).
    Accepted,
    /// Rejected by the donor.
    Rejected,
    /// Cancelled by the requester.
    Cancelled,
    /// Completed by the requester, optionally with a rating.
    Completed,
}

impl RequestStatus {
    /// Check whether this is the initial, actionable state.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check whether this state is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = bloodlink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(bloodlink_core::AppError::validation(format!(
                "Invalid request status: '{s}'. Expected one of: pending, accepted, rejected, cancelled, completed"
            ))),
        }
    }
}
