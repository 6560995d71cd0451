//! Route definitions for the BloodLink HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(donor_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: signup, login, credential checks, password change
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/check-email", get(handlers::auth::check_email))
        .route("/auth/check-phone", get(handlers::auth::check_phone))
        .route(
            "/auth/change-password",
            post(handlers::auth::change_password),
        )
}

/// Donor self-service endpoints: profile, search, requests, history
fn donor_routes() -> Router<AppState> {
    Router::new()
        .route("/donor/profile", get(handlers::donor::get_profile))
        .route("/donor/profile", put(handlers::donor::update_profile))
        .route("/donor/search", get(handlers::donor::search_donors))
        .route("/donor/request", post(handlers::request::create_request))
        .route("/donor/requests", get(handlers::request::list_requests))
        .route(
            "/donor/requests/{id}/reject",
            patch(handlers::request::reject_request),
        )
        .route(
            "/donor/requests/{id}/cancel",
            patch(handlers::request::cancel_request),
        )
        .route(
            "/donor/requests/{id}/complete",
            patch(handlers::request::complete_request),
        )
        .route("/donor/history", get(handlers::request::donation_history))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(handlers::auth::admin_login))
        .route("/admin/stats", get(handlers::admin::stats))
        .route("/admin/requests", get(handlers::admin::list_requests))
        .route("/admin/donors", get(handlers::admin::list_donors))
        .route("/admin/donors/{id}", get(handlers::admin::get_donor))
        .route("/admin/donors/{id}", patch(handlers::admin::update_donor))
        .route(
            "/admin/donors/{id}/status",
            patch(handlers::admin::change_status),
        )
        .route(
            "/admin/donors/{id}/verify",
            patch(handlers::admin::verify_donor),
        )
        .route("/admin/donors/{id}", delete(handlers::admin::delete_donor))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
