//! BloodLink Server — blood-donor coordination backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use bloodlink_core::config::AppConfig;
use bloodlink_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("BLOODLINK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting BloodLink v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = bloodlink_database::DatabasePool::connect(&config.database).await?;
    bloodlink_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Step 2: Initialize repositories ──────────────────────────
    let donor_repo = Arc::new(
        bloodlink_database::repositories::donor::DonorRepository::new(db_pool.clone()),
    );
    let request_repo = Arc::new(
        bloodlink_database::repositories::request::RequestRepository::new(db_pool.clone()),
    );

    // ── Step 3: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(bloodlink_auth::password::hasher::PasswordHasher::new());
    let password_validator = Arc::new(bloodlink_auth::password::validator::PasswordValidator::new(
        &config.auth,
    ));
    let jwt_encoder = Arc::new(bloodlink_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(bloodlink_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // ── Step 4: Initialize services ──────────────────────────────
    let gate = bloodlink_service::availability::AvailabilityGate::new(&config.donation);

    let auth_service = Arc::new(bloodlink_service::auth::service::AuthService::new(
        Arc::clone(&donor_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
        Arc::clone(&jwt_encoder),
    ));
    let donor_service = Arc::new(bloodlink_service::donor::service::DonorService::new(
        Arc::clone(&donor_repo),
    ));
    let request_service = Arc::new(bloodlink_service::request::service::RequestService::new(
        Arc::clone(&request_repo),
        Arc::clone(&donor_repo),
        gate,
    ));
    let admin_service = Arc::new(bloodlink_service::donor::admin::AdminDonorService::new(
        Arc::clone(&donor_repo),
        Arc::clone(&request_repo),
    ));

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = bloodlink_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        donor_repo,
        request_repo,
        auth_service,
        donor_service,
        request_service,
        admin_service,
    };

    let app = bloodlink_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("BloodLink server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("BloodLink server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
