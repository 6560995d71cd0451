//! Auth handlers — signup, login, admin login, credential checks,
//! password changes.

use axum::Json;
use axum::extract::{Query, State};

use bloodlink_service::auth::service::SignupData;

use crate::dto::request::{
    ChangePasswordRequest, CheckEmailParams, CheckPhoneParams, LoginRequest, SignupRequest,
};
use crate::dto::response::{ExistsResponse, LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validate_body;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_body(&req)?;
    let blood_group = req.blood_group.parse()?;

    let result = state
        .auth_service
        .signup(SignupData {
            name: req.name,
            email: req.email,
            password: req.password,
            blood_group,
            location: req.location,
            phone_number: req.phone_number,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        donor: result.donor.into(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_body(&req)?;

    let result = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        donor: result.donor.into(),
    }))
}

/// POST /api/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_body(&req)?;

    let result = state
        .auth_service
        .admin_login(&req.email, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        donor: result.donor.into(),
    }))
}

/// GET /api/auth/check-email
pub async fn check_email(
    State(state): State<AppState>,
    Query(params): Query<CheckEmailParams>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let exists = state.auth_service.email_exists(&params.email).await?;
    Ok(Json(ExistsResponse { exists }))
}

/// GET /api/auth/check-phone
pub async fn check_phone(
    State(state): State<AppState>,
    Query(params): Query<CheckPhoneParams>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let exists = state.auth_service.phone_exists(&params.phone).await?;
    Ok(Json(ExistsResponse { exists }))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_body(&req)?;

    state
        .auth_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}
