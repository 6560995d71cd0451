//! HTTP handlers, organized by domain.

pub mod admin;
pub mod auth;
pub mod donor;
pub mod health;
pub mod request;

use bloodlink_core::error::AppError;
use validator::Validate;

/// Runs `validator` checks on a request body, flattening the first
/// violation into a validation error.
pub(crate) fn validate_body(body: &impl Validate) -> Result<(), AppError> {
    body.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{field}'"))
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::validation(message)
    })
}
