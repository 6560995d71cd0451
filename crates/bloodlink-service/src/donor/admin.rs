//! Admin moderation of the donor pool — listing, edits, status changes,
//! verification, deletion, and pool statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use bloodlink_core::error::AppError;
use bloodlink_core::types::pagination::{PageRequest, PageResponse};
use bloodlink_database::repositories::donor::{DonorFilter, DonorRepository};
use bloodlink_database::repositories::request::RequestRepository;
use bloodlink_entity::donor::{AdminUpdateDonor, BloodGroup, Donor, DonorStatus};
use bloodlink_entity::request::BloodRequest;

use crate::context::RequestContext;

/// Aggregate statistics over the donor pool and open requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Requests currently in the pending state.
    pub active_requests: u64,
    /// Total registered donor accounts.
    pub total_donors: u64,
    /// Donor count per blood group; all 8 groups are always present.
    pub donors_by_blood_group: BTreeMap<String, i64>,
}

/// Handles administrative donor-pool management.
#[derive(Debug, Clone)]
pub struct AdminDonorService {
    /// Donor repository.
    donor_repo: Arc<DonorRepository>,
    /// Request repository.
    request_repo: Arc<RequestRepository>,
}

impl AdminDonorService {
    /// Creates a new admin donor service.
    pub fn new(donor_repo: Arc<DonorRepository>, request_repo: Arc<RequestRepository>) -> Self {
        Self {
            donor_repo,
            request_repo,
        }
    }

    /// Computes pool statistics for the admin dashboard.
    pub async fn stats(&self, ctx: &RequestContext) -> Result<AdminStats, AppError> {
        self.require_admin(ctx)?;

        let active_requests = self.request_repo.count_pending().await?;
        let total_donors = self.donor_repo.count().await?;

        let mut donors_by_blood_group: BTreeMap<String, i64> = BloodGroup::ALL
            .iter()
            .map(|g| (g.as_str().to_string(), 0))
            .collect();
        for (group, count) in self.donor_repo.count_by_blood_group().await? {
            donors_by_blood_group.insert(group.as_str().to_string(), count);
        }

        Ok(AdminStats {
            active_requests,
            total_donors,
            donors_by_blood_group,
        })
    }

    /// Lists all blood requests, newest first.
    pub async fn list_requests(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<BloodRequest>, AppError> {
        self.require_admin(ctx)?;
        self.request_repo.list_all(&page).await
    }

    /// Lists donors matching the given filters.
    pub async fn list_donors(
        &self,
        ctx: &RequestContext,
        filter: DonorFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Donor>, AppError> {
        self.require_admin(ctx)?;
        self.donor_repo.find_filtered(&filter, &page).await
    }

    /// Gets a single donor by ID.
    pub async fn get_donor(&self, ctx: &RequestContext, donor_id: Uuid) -> Result<Donor, AppError> {
        self.require_admin(ctx)?;
        self.donor_repo
            .find_by_id(donor_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))
    }

    /// Applies an administrative edit to a donor's profile.
    pub async fn update_donor(
        &self,
        ctx: &RequestContext,
        donor_id: Uuid,
        data: AdminUpdateDonor,
    ) -> Result<Donor, AppError> {
        self.require_admin(ctx)?;

        if let Some(ref email) = data.email {
            if !email.contains('@') {
                return Err(AppError::validation("Invalid email format"));
            }
            if let Some(existing) = self.donor_repo.find_by_email(email).await? {
                if existing.id != donor_id {
                    return Err(AppError::conflict("Email is already registered"));
                }
            }
        }

        let donor = self.donor_repo.admin_update(donor_id, &data).await?;
        info!(admin_id = %ctx.donor_id, donor_id = %donor_id, "Donor updated by admin");
        Ok(donor)
    }

    /// Suspends or reactivates a donor account.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        donor_id: Uuid,
        status: DonorStatus,
        reason: Option<String>,
    ) -> Result<Donor, AppError> {
        self.require_admin(ctx)?;

        if donor_id == ctx.donor_id {
            return Err(AppError::validation("You cannot change your own status"));
        }

        let donor = self.donor_repo.update_status(donor_id, status).await?;
        warn!(
            admin_id = %ctx.donor_id,
            donor_id = %donor_id,
            status = %status,
            reason = reason.as_deref().unwrap_or("-"),
            "Donor status changed"
        );
        Ok(donor)
    }

    /// Sets or clears a donor's verified badge.
    pub async fn set_verified(
        &self,
        ctx: &RequestContext,
        donor_id: Uuid,
        verified: bool,
        note: Option<String>,
    ) -> Result<Donor, AppError> {
        self.require_admin(ctx)?;

        let donor = self.donor_repo.update_verified(donor_id, verified).await?;
        info!(
            admin_id = %ctx.donor_id,
            donor_id = %donor_id,
            verified,
            note = note.as_deref().unwrap_or("-"),
            "Donor verification changed"
        );
        Ok(donor)
    }

    /// Deletes a donor account.
    pub async fn delete_donor(&self, ctx: &RequestContext, donor_id: Uuid) -> Result<(), AppError> {
        self.require_admin(ctx)?;

        if donor_id == ctx.donor_id {
            return Err(AppError::validation("You cannot delete your own account"));
        }

        let deleted = self.donor_repo.delete(donor_id).await?;
        if !deleted {
            return Err(AppError::not_found("Donor not found"));
        }

        warn!(admin_id = %ctx.donor_id, donor_id = %donor_id, "Donor deleted");
        Ok(())
    }

    fn require_admin(&self, ctx: &RequestContext) -> Result<(), AppError> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden("Admin access required"));
        }
        Ok(())
    }
}
