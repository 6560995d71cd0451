//! Request context carrying the authenticated account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bloodlink_entity::donor::DonorRole;

/// Context for the current authenticated request.
///
/// Extracted from the bearer token per request and passed into service
/// methods so that every operation knows *who* is acting. This is the
/// explicit per-request state that replaces any process-wide profile
/// cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account's ID.
    pub donor_id: Uuid,
    /// The account's role at the time the JWT was issued.
    pub role: DonorRole,
    /// The email (convenience field from JWT claims).
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(donor_id: Uuid, role: DonorRole, email: String) -> Self {
        Self {
            donor_id,
            role,
            email,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current account is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
