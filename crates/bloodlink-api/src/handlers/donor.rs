//! Donor self-service handlers — profile and search.

use axum::Json;
use axum::extract::{Query, State};

use bloodlink_core::error::AppError;
use bloodlink_entity::donor::UpdateDonorProfile;

use crate::dto::request::{SearchDonorsParams, UpdateProfileRequest};
use crate::dto::response::DonorResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/donor/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DonorResponse>, ApiError> {
    let donor = state.donor_service.get_profile(&auth).await?;
    Ok(Json(donor.into()))
}

/// PUT /api/donor/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<DonorResponse>, ApiError> {
    let donor = state
        .donor_service
        .update_profile(
            &auth,
            UpdateDonorProfile {
                name: req.name,
                location: req.location,
                phone_number: req.phone_number,
            },
        )
        .await?;
    Ok(Json(donor.into()))
}

/// GET /api/donor/search
pub async fn search_donors(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchDonorsParams>,
) -> Result<Json<Vec<DonorResponse>>, ApiError> {
    let location = params
        .location
        .ok_or_else(|| AppError::validation("Location is required"))?;

    let blood_group = match params.blood_group.as_deref() {
        Some(s) if !s.is_empty() => Some(s.parse()?),
        _ => None,
    };

    let donors = state
        .donor_service
        .search(&auth, &location, blood_group)
        .await?;

    Ok(Json(donors.into_iter().map(DonorResponse::from).collect()))
}
