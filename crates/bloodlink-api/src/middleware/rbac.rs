//! Role-based route guarding helpers.

use bloodlink_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated account has the admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}
