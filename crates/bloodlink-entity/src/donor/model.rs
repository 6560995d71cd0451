//! Donor entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::blood_group::BloodGroup;
use super::role::DonorRole;
use super::status::DonorStatus;

/// A registered account in the BloodLink system.
///
/// Every account is a donor; any donor can also act as a requester.
/// Field names serialize in camelCase because the wire contract is shared
/// with the mobile client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    /// Unique donor identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Email address (unique, login credential).
    pub email: String,
    /// Phone number (unique).
    pub phone_number: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// ABO/Rh blood group.
    pub blood_group: BloodGroup,
    /// Free-text location (city/region).
    pub location: String,
    /// Account role.
    pub role: DonorRole,
    /// Whether an admin has verified this donor.
    pub verified: bool,
    /// Account status, admin-controlled.
    pub status: DonorStatus,
    /// While in the future, the donor cannot receive new requests.
    pub next_available_at: Option<DateTime<Utc>>,
    /// Sum of all completion ratings received as the donor party.
    pub rating_sum: i64,
    /// Number of completion ratings received.
    pub rating_count: i32,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Donor {
    /// Average rating over completed donations, derived from the running
    /// sum and count so repeated updates cannot drift.
    pub fn avg_rating(&self) -> Option<f64> {
        if self.rating_count == 0 {
            None
        } else {
            Some(self.rating_sum as f64 / self.rating_count as f64)
        }
    }

    /// Check if this donor has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new donor account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonor {
    /// Full name.
    pub name: String,
    /// Email address (unique).
    pub email: String,
    /// Phone number (unique).
    pub phone_number: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// ABO/Rh blood group.
    pub blood_group: BloodGroup,
    /// Free-text location.
    pub location: String,
    /// Assigned role.
    pub role: DonorRole,
}

/// Data for updating a donor's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonorProfile {
    /// New full name.
    pub name: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
}

/// Data for an administrative donor edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateDonor {
    /// New full name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New blood group.
    pub blood_group: Option<BloodGroup>,
    /// New location.
    pub location: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donor_with_ratings(sum: i64, count: i32) -> Donor {
        Donor {
            id: Uuid::new_v4(),
            name: "Test Donor".to_string(),
            email: "donor@example.com".to_string(),
            phone_number: "+15550001111".to_string(),
            password_hash: "hash".to_string(),
            blood_group: BloodGroup::OPositive,
            location: "Springfield".to_string(),
            role: DonorRole::Donor,
            verified: false,
            status: DonorStatus::Active,
            next_available_at: None,
            rating_sum: sum,
            rating_count: count,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_avg_rating_unrated() {
        assert_eq!(donor_with_ratings(0, 0).avg_rating(), None);
    }

    #[test]
    fn test_avg_rating_derived_from_sum_and_count() {
        // One prior 5 plus a new 4 averages to 4.5
        assert_eq!(donor_with_ratings(9, 2).avg_rating(), Some(4.5));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(donor_with_ratings(0, 0)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json.get("bloodGroup").unwrap(), "O+");
    }
}
