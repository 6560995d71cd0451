//! Donor account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available for BloodLink accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "donor_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DonorRole {
    /// Regular donor account; can send and receive blood requests.
    Donor,
    /// Administrator; moderates the donor pool.
    Admin,
}

impl DonorRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for DonorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DonorRole {
    type Err = bloodlink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "donor" => Ok(Self::Donor),
            "admin" => Ok(Self::Admin),
            _ => Err(bloodlink_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: donor, admin"
            ))),
        }
    }
}
