//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use bloodlink_auth::jwt::decoder::JwtDecoder;
use bloodlink_auth::jwt::encoder::JwtEncoder;
use bloodlink_auth::password::hasher::PasswordHasher;
use bloodlink_core::config::AppConfig;

use bloodlink_database::repositories::donor::DonorRepository;
use bloodlink_database::repositories::request::RequestRepository;

use bloodlink_service::auth::service::AuthService;
use bloodlink_service::donor::admin::AdminDonorService;
use bloodlink_service::donor::service::DonorService;
use bloodlink_service::request::service::RequestService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,

    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2).
    pub password_hasher: Arc<PasswordHasher>,

    /// Donor repository.
    pub donor_repo: Arc<DonorRepository>,
    /// Request repository.
    pub request_repo: Arc<RequestRepository>,

    /// Registration and authentication flows.
    pub auth_service: Arc<AuthService>,
    /// Donor profile and search.
    pub donor_service: Arc<DonorService>,
    /// Request lifecycle engine.
    pub request_service: Arc<RequestService>,
    /// Admin donor-pool moderation.
    pub admin_service: Arc<AdminDonorService>,
}
