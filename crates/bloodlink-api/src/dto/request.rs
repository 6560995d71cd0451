//! Request DTOs with validation.
//!
//! Enum-valued fields arrive as strings and are parsed in the handlers so
//! that a bad value produces a clear validation message instead of a
//! generic deserialization rejection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Full name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address; full format checks happen in the service layer.
    #[validate(length(min = 3, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Blood group in conventional notation (e.g. "O+").
    #[validate(length(min = 1, message = "Blood group is required"))]
    pub blood_group: String,
    /// Location.
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    /// Phone number.
    #[validate(length(min = 5, message = "Phone number is required"))]
    pub phone_number: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Update own profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New name.
    pub name: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
}

/// Create blood request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBloodRequest {
    /// The targeted donor.
    pub donor_id: Uuid,
    /// Optional note attached at creation.
    pub note: Option<String>,
}

/// Body for reject/cancel transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionNoteRequest {
    /// Optional note explaining the transition.
    pub note: Option<String>,
}

/// Body for the complete transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteRequest {
    /// Optional rating 1–5 for the donor.
    pub rating: Option<i32>,
}

/// Admin donor edit request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateDonorRequest {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New blood group, conventional notation.
    pub blood_group: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
}

/// Admin donor status change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    /// New status: "active" or "suspended".
    pub status: String,
    /// Optional reason, recorded in the logs.
    pub reason: Option<String>,
}

/// Admin donor verification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyDonorRequest {
    /// New verified flag.
    pub verified: bool,
    /// Optional note, recorded in the logs.
    pub note: Option<String>,
}

/// Query parameters for donor search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDonorsParams {
    /// Location substring (required).
    pub location: Option<String>,
    /// Optional blood group filter, conventional notation.
    pub blood_group: Option<String>,
}

/// Query parameters for listing own requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequestsParams {
    /// "sent", "received", or absent for both.
    #[serde(rename = "type")]
    pub direction: Option<String>,
    /// Page number.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Query parameters for the admin donor listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDonorsParams {
    /// Free-text match against name or email.
    pub query: Option<String>,
    /// Blood group filter, conventional notation.
    pub blood_group: Option<String>,
    /// Status filter: "active" or "suspended".
    pub status: Option<String>,
    /// Location substring filter.
    pub location: Option<String>,
    /// Page number.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Query parameters for the email existence check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckEmailParams {
    /// Email to check.
    pub email: String,
}

/// Query parameters for the phone existence check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckPhoneParams {
    /// Phone number to check.
    pub phone: String,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    25
}
