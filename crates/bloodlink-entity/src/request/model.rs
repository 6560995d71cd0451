//! Blood request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::RequestStatus;

/// A donation request from one account (the requester) to another (the donor).
///
/// Requests are never deleted; terminal rows form the donation history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The account that initiated the request.
    pub requester_id: Uuid,
    /// The targeted donor. Always differs from `requester_id`.
    pub donor_id: Uuid,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// Optional free-text annotation, attached at creation or rejection/cancellation.
    pub note: Option<String>,
    /// Rating 1–5, set only on completion.
    pub rating: Option<i32>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// Stamped on every status transition.
    pub updated_at: DateTime<Utc>,
}

impl BloodRequest {
    /// Check whether the given account is one of the two participants.
    pub fn involves(&self, account_id: Uuid) -> bool {
        self.requester_id == account_id || self.donor_id == account_id
    }
}
