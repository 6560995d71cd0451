//! Donor account status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account status for a donor, controlled by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "donor_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DonorStatus {
    /// Account is active and can participate in requests.
    Active,
    /// Account is suspended by an admin; it cannot receive requests or log in.
    Suspended,
}

impl DonorStatus {
    /// Check if the account can participate in the request lifecycle.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for DonorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DonorStatus {
    type Err = bloodlink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            _ => Err(bloodlink_core::AppError::validation(format!(
                "Invalid donor status: '{s}'. Expected one of: active, suspended"
            ))),
        }
    }
}
