//! Admin donor-pool management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use bloodlink_core::types::pagination::{PageRequest, PageResponse};
use bloodlink_database::repositories::donor::DonorFilter;
use bloodlink_entity::donor::AdminUpdateDonor;
use bloodlink_entity::request::BloodRequest;
use bloodlink_service::donor::admin::AdminStats;

use crate::dto::request::{
    AdminDonorsParams, AdminUpdateDonorRequest, ChangeStatusRequest, VerifyDonorRequest,
};
use crate::dto::response::{DonorResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AdminStats>, ApiError> {
    require_admin(&auth)?;
    let stats = state.admin_service.stats(&auth).await?;
    Ok(Json(stats))
}

/// GET /api/admin/requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<BloodRequest>>, ApiError> {
    require_admin(&auth)?;
    let requests = state
        .admin_service
        .list_requests(&auth, params.into_page_request())
        .await?;
    Ok(Json(requests))
}

/// GET /api/admin/donors
pub async fn list_donors(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AdminDonorsParams>,
) -> Result<Json<PageResponse<DonorResponse>>, ApiError> {
    require_admin(&auth)?;

    let filter = DonorFilter {
        query: params.query.filter(|q| !q.is_empty()),
        blood_group: match params.blood_group.as_deref() {
            Some(s) if !s.is_empty() => Some(s.parse()?),
            _ => None,
        },
        status: match params.status.as_deref() {
            Some(s) if !s.is_empty() => Some(s.parse()?),
            _ => None,
        },
        location: params.location.filter(|l| !l.is_empty()),
    };
    let page = PageRequest::new(params.page, params.limit);

    let donors = state.admin_service.list_donors(&auth, filter, page).await?;
    Ok(Json(donors.map(DonorResponse::from)))
}

/// GET /api/admin/donors/{id}
pub async fn get_donor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DonorResponse>, ApiError> {
    require_admin(&auth)?;
    let donor = state.admin_service.get_donor(&auth, id).await?;
    Ok(Json(donor.into()))
}

/// PATCH /api/admin/donors/{id}
pub async fn update_donor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AdminUpdateDonorRequest>,
) -> Result<Json<DonorResponse>, ApiError> {
    require_admin(&auth)?;

    let blood_group = match req.blood_group.as_deref() {
        Some(s) if !s.is_empty() => Some(s.parse()?),
        _ => None,
    };

    let donor = state
        .admin_service
        .update_donor(
            &auth,
            id,
            AdminUpdateDonor {
                name: req.name,
                email: req.email,
                blood_group,
                location: req.location,
                phone_number: req.phone_number,
            },
        )
        .await?;
    Ok(Json(donor.into()))
}

/// PATCH /api/admin/donors/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<DonorResponse>, ApiError> {
    require_admin(&auth)?;
    let status = req.status.parse()?;
    let donor = state
        .admin_service
        .change_status(&auth, id, status, req.reason)
        .await?;
    Ok(Json(donor.into()))
}

/// PATCH /api/admin/donors/{id}/verify
pub async fn verify_donor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<VerifyDonorRequest>,
) -> Result<Json<DonorResponse>, ApiError> {
    require_admin(&auth)?;
    let donor = state
        .admin_service
        .set_verified(&auth, id, req.verified, req.note)
        .await?;
    Ok(Json(donor.into()))
}

/// DELETE /api/admin/donors/{id}
pub async fn delete_donor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_admin(&auth)?;
    state.admin_service.delete_donor(&auth, id).await?;
    Ok(Json(MessageResponse {
        message: "Donor deleted".to_string(),
    }))
}
