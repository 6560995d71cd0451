//! Donor self-service operations — profile viewing, profile updates, and
//! donor search.

use std::sync::Arc;

use tracing::info;

use bloodlink_core::error::AppError;
use bloodlink_database::repositories::donor::DonorRepository;
use bloodlink_entity::donor::{BloodGroup, Donor, UpdateDonorProfile};

use crate::context::RequestContext;

/// Handles donor self-service operations.
#[derive(Debug, Clone)]
pub struct DonorService {
    /// Donor repository.
    donor_repo: Arc<DonorRepository>,
}

impl DonorService {
    /// Creates a new donor service.
    pub fn new(donor_repo: Arc<DonorRepository>) -> Self {
        Self { donor_repo }
    }

    /// Gets the current account's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<Donor, AppError> {
        self.donor_repo
            .find_by_id(ctx.donor_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))
    }

    /// Updates the current account's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateDonorProfile,
    ) -> Result<Donor, AppError> {
        if let Some(ref name) = req.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }
        if let Some(ref location) = req.location {
            if location.trim().is_empty() {
                return Err(AppError::validation("Location cannot be empty"));
            }
        }
        if let Some(ref phone) = req.phone_number {
            if phone.trim().is_empty() {
                return Err(AppError::validation("Phone number cannot be empty"));
            }

            // Check uniqueness before the write for a friendlier message;
            // the unique index still backstops races.
            if let Some(existing) = self.donor_repo.find_by_phone(phone).await? {
                if existing.id != ctx.donor_id {
                    return Err(AppError::conflict("Phone number is already registered"));
                }
            }
        }

        let donor = self
            .donor_repo
            .update_profile(
                ctx.donor_id,
                req.name.as_deref(),
                req.location.as_deref(),
                req.phone_number.as_deref(),
            )
            .await?;

        info!(donor_id = %ctx.donor_id, "Profile updated");

        Ok(donor)
    }

    /// Searches active, currently-available donors near a location.
    ///
    /// The caller is always excluded from the results.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        location: &str,
        blood_group: Option<BloodGroup>,
    ) -> Result<Vec<Donor>, AppError> {
        if location.trim().is_empty() {
            return Err(AppError::validation("Location is required"));
        }

        self.donor_repo
            .search_available(location, blood_group, ctx.donor_id)
            .await
    }
}
