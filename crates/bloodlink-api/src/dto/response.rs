//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bloodlink_entity::donor::{BloodGroup, Donor};

/// Donor summary for responses.
///
/// Exposes the derived average rating instead of the raw running sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorResponse {
    /// Donor ID.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Blood group.
    pub blood_group: BloodGroup,
    /// Location.
    pub location: String,
    /// Phone number.
    pub phone_number: String,
    /// Role.
    pub role: String,
    /// Admin-verified badge.
    pub verified: bool,
    /// Account status.
    pub status: String,
    /// Cooldown expiry, if inside a cooldown window.
    pub next_available_at: Option<DateTime<Utc>>,
    /// Average completion rating, if any ratings exist.
    pub avg_rating: Option<f64>,
    /// Number of completion ratings.
    pub rating_count: i32,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Donor> for DonorResponse {
    fn from(donor: Donor) -> Self {
        Self {
            avg_rating: donor.avg_rating(),
            id: donor.id,
            name: donor.name,
            email: donor.email,
            blood_group: donor.blood_group,
            location: donor.location,
            phone_number: donor.phone_number,
            role: donor.role.to_string(),
            verified: donor.verified,
            status: donor.status.to_string(),
            next_available_at: donor.next_available_at,
            rating_count: donor.rating_count,
            created_at: donor.created_at,
        }
    }
}

/// Login/signup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The authenticated account.
    pub donor: DonorResponse,
}

/// Existence check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    /// Whether the credential is already registered.
    pub exists: bool,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
