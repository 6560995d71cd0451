//! Blood request lifecycle handlers.
//!
//! The reject/cancel/complete bodies are optional: the mobile client sends
//! an empty or absent body when there is no note or rating.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use bloodlink_core::error::AppError;
use bloodlink_core::types::pagination::{PageRequest, PageResponse};
use bloodlink_database::repositories::request::RequestDirection;
use bloodlink_entity::request::BloodRequest;

use crate::dto::request::{
    CompleteRequest, CreateBloodRequest, ListRequestsParams, TransitionNoteRequest,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/donor/request
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBloodRequest>,
) -> Result<Json<BloodRequest>, ApiError> {
    let request = state
        .request_service
        .create(&auth, req.donor_id, req.note)
        .await?;
    Ok(Json(request))
}

/// GET /api/donor/requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListRequestsParams>,
) -> Result<Json<PageResponse<BloodRequest>>, ApiError> {
    let direction = match params.direction.as_deref() {
        None | Some("") => RequestDirection::All,
        Some("sent") => RequestDirection::Sent,
        Some("received") => RequestDirection::Received,
        Some(other) => {
            return Err(AppError::validation(format!(
                "Invalid request type: '{other}'. Expected 'sent' or 'received'"
            ))
            .into());
        }
    };

    let page = PageRequest::new(params.page, params.limit);
    let requests = state.request_service.list(&auth, direction, page).await?;
    Ok(Json(requests))
}

/// PATCH /api/donor/requests/{id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<BloodRequest>, ApiError> {
    let body: TransitionNoteRequest = parse_optional_body(&body)?;
    let request = state.request_service.reject(&auth, id, body.note).await?;
    Ok(Json(request))
}

/// PATCH /api/donor/requests/{id}/cancel
pub async fn cancel_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<BloodRequest>, ApiError> {
    let body: TransitionNoteRequest = parse_optional_body(&body)?;
    let request = state.request_service.cancel(&auth, id, body.note).await?;
    Ok(Json(request))
}

/// PATCH /api/donor/requests/{id}/complete
pub async fn complete_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<BloodRequest>, ApiError> {
    let body: CompleteRequest = parse_optional_body(&body)?;
    let request = state.request_service.complete(&auth, id, body.rating).await?;
    Ok(Json(request))
}

/// Parses an optional JSON body, treating an absent or empty body as the
/// default value.
fn parse_optional_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, AppError> {
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))
}

/// GET /api/donor/history
pub async fn donation_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<crate::extractors::PaginationParams>,
) -> Result<Json<PageResponse<BloodRequest>>, ApiError> {
    let requests = state
        .request_service
        .history(&auth, params.into_page_request())
        .await?;
    Ok(Json(requests))
}
