//! Request lifecycle engine — create, reject, cancel, complete.
//!
//! State space: `pending` (initial) with terminal states `accepted`,
//! `rejected`, `cancelled`, and `completed`. The exercised transitions are
//! `pending → rejected` (donor), `pending → cancelled` (requester), and
//! `pending → completed` (requester, optionally carrying a rating).
//!
//! Every transition is performed as an atomic check-and-set in the
//! repository, keyed on the expected `pending` status: exactly one of two
//! racing transitions can win, and the loser is reported `InvalidState`.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use bloodlink_core::error::AppError;
use bloodlink_core::types::pagination::{PageRequest, PageResponse};
use bloodlink_database::repositories::request::{RequestDirection, RequestRepository};
use bloodlink_database::repositories::donor::DonorRepository;
use bloodlink_entity::request::{BloodRequest, RequestStatus};

use crate::availability::AvailabilityGate;
use crate::context::RequestContext;

/// Lowest accepted completion rating.
const MIN_RATING: i32 = 1;
/// Highest accepted completion rating.
const MAX_RATING: i32 = 5;

/// Handles the blood request lifecycle.
#[derive(Debug, Clone)]
pub struct RequestService {
    /// Request repository.
    request_repo: Arc<RequestRepository>,
    /// Donor repository.
    donor_repo: Arc<DonorRepository>,
    /// Availability gate.
    gate: AvailabilityGate,
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(
        request_repo: Arc<RequestRepository>,
        donor_repo: Arc<DonorRepository>,
        gate: AvailabilityGate,
    ) -> Self {
        Self {
            request_repo,
            donor_repo,
            gate,
        }
    }

    /// Creates a new pending request from the caller to `donor_id`.
    ///
    /// The availability check here is a read followed by an insert. A donor
    /// completing a donation between the two can let one extra request
    /// through; that is an accepted business risk, not a lifecycle
    /// invariant, so no lock is taken around it.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        donor_id: Uuid,
        note: Option<String>,
    ) -> Result<BloodRequest, AppError> {
        if ctx.donor_id == donor_id {
            return Err(AppError::invalid_target(
                "You cannot send a blood request to yourself",
            ));
        }

        let donor = self
            .donor_repo
            .find_by_id(donor_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))?;

        if !donor.status.is_active() {
            return Err(AppError::donor_suspended(
                "This donor account is suspended and cannot receive requests",
            ));
        }

        if !self.gate.is_available(&donor, Utc::now()) {
            return Err(AppError::donor_unavailable(
                "This donor recently donated and is not yet available for new requests",
            ));
        }

        let request = self
            .request_repo
            .create(ctx.donor_id, donor_id, note.as_deref())
            .await?;

        info!(
            request_id = %request.id,
            requester_id = %ctx.donor_id,
            donor_id = %donor_id,
            "Blood request created"
        );

        Ok(request)
    }

    /// Rejects a pending request. Only the targeted donor may reject.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        note: Option<String>,
    ) -> Result<BloodRequest, AppError> {
        let request = self.load(request_id).await?;

        if request.donor_id != ctx.donor_id {
            return Err(AppError::forbidden(
                "Only the requested donor can reject this request",
            ));
        }
        self.ensure_pending(&request)?;

        let updated = self
            .request_repo
            .transition_from_pending(request_id, RequestStatus::Rejected, note.as_deref())
            .await?
            .ok_or_else(Self::lost_transition_race)?;

        info!(request_id = %request_id, "Blood request rejected");
        Ok(updated)
    }

    /// Cancels a pending request. Only the requester may cancel.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        note: Option<String>,
    ) -> Result<BloodRequest, AppError> {
        let request = self.load(request_id).await?;

        if request.requester_id != ctx.donor_id {
            return Err(AppError::forbidden(
                "Only the requester can cancel this request",
            ));
        }
        self.ensure_pending(&request)?;

        let updated = self
            .request_repo
            .transition_from_pending(request_id, RequestStatus::Cancelled, note.as_deref())
            .await?
            .ok_or_else(Self::lost_transition_race)?;

        info!(request_id = %request_id, "Blood request cancelled");
        Ok(updated)
    }

    /// Completes a pending request. Only the requester may complete.
    ///
    /// If a rating is supplied it must be an integer in [1, 5]; it is folded
    /// into the donor's running aggregate inside the same transaction that
    /// flips the status, together with the new cooldown expiry.
    pub async fn complete(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        rating: Option<i32>,
    ) -> Result<BloodRequest, AppError> {
        if let Some(r) = rating {
            if !(MIN_RATING..=MAX_RATING).contains(&r) {
                return Err(AppError::invalid_rating(format!(
                    "Rating must be between {MIN_RATING} and {MAX_RATING}, got {r}"
                )));
            }
        }

        let request = self.load(request_id).await?;

        if request.requester_id != ctx.donor_id {
            return Err(AppError::forbidden(
                "Only the requester can complete this request",
            ));
        }
        self.ensure_pending(&request)?;

        let next_available_at = self.gate.next_available_at(Utc::now());

        let updated = self
            .request_repo
            .complete_from_pending(request_id, rating, next_available_at)
            .await?
            .ok_or_else(Self::lost_transition_race)?;

        info!(
            request_id = %request_id,
            donor_id = %updated.donor_id,
            rating = ?rating,
            next_available_at = %next_available_at,
            "Blood request completed"
        );
        Ok(updated)
    }

    /// Lists requests the caller sent, received, or both.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        direction: RequestDirection,
        page: PageRequest,
    ) -> Result<PageResponse<BloodRequest>, AppError> {
        self.request_repo
            .list_for_account(ctx.donor_id, direction, &page)
            .await
    }

    /// Lists completed requests involving the caller (donation history).
    pub async fn history(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<BloodRequest>, AppError> {
        self.request_repo
            .history_for_account(ctx.donor_id, &page)
            .await
    }

    async fn load(&self, request_id: Uuid) -> Result<BloodRequest, AppError> {
        self.request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Request not found"))
    }

    fn ensure_pending(&self, request: &BloodRequest) -> Result<(), AppError> {
        if request.status.is_terminal() {
            return Err(AppError::invalid_state(format!(
                "Request is already {} and cannot change state",
                request.status
            )));
        }
        Ok(())
    }

    /// The conditional update matched no row: a concurrent transition won
    /// between our precondition read and the write.
    fn lost_transition_race() -> AppError {
        AppError::invalid_state("Request is no longer pending")
    }
}
