//! Shared test helpers for integration tests.
//!
//! These tests exercise the real router against a real PostgreSQL
//! database. Set `BLOODLINK_TEST_DATABASE_URL` to run them; without it
//! each test logs a skip notice and returns early.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower::ServiceExt;
use uuid::Uuid;

use bloodlink_core::config::{AppConfig, DatabaseConfig};

/// A password that satisfies the signup policy (length, digit, entropy).
pub const TEST_PASSWORD: &str = "plum-Trellis-41-Gondola";

/// Tests within one binary share the database; this lock serializes them
/// so the per-test cleanup cannot race a running test.
static DB_LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Held for the lifetime of the test to serialize database access
    _db_guard: OwnedMutexGuard<()>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is
    /// configured.
    pub async fn try_new() -> Option<Self> {
        let url = match std::env::var("BLOODLINK_TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("BLOODLINK_TEST_DATABASE_URL not set; skipping integration test");
                return None;
            }
        };

        let db_guard = DB_LOCK
            .get_or_init(|| Arc::new(Mutex::new(())))
            .clone()
            .lock_owned()
            .await;

        let config = AppConfig {
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 10,
                idle_timeout_seconds: 300,
            },
            server: Default::default(),
            auth: Default::default(),
            donation: Default::default(),
            logging: Default::default(),
        };

        let db = bloodlink_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        bloodlink_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        let db_pool = db.into_pool();

        Self::clean_database(&db_pool).await;

        let donor_repo = Arc::new(
            bloodlink_database::repositories::donor::DonorRepository::new(db_pool.clone()),
        );
        let request_repo = Arc::new(
            bloodlink_database::repositories::request::RequestRepository::new(db_pool.clone()),
        );

        let password_hasher = Arc::new(bloodlink_auth::password::hasher::PasswordHasher::new());
        let password_validator = Arc::new(
            bloodlink_auth::password::validator::PasswordValidator::new(&config.auth),
        );
        let jwt_encoder = Arc::new(bloodlink_auth::jwt::encoder::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(bloodlink_auth::jwt::decoder::JwtDecoder::new(&config.auth));

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

        let app_state = bloodlink_api::state::AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
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

        let router = bloodlink_api::router::build_router(app_state);

        Some(Self {
            router,
            db_pool,
            _db_guard: db_guard,
        })
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        for table in ["blood_requests", "donors"] {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Register a donor through the API and return (id, token)
    pub async fn signup_donor(&self, name: &str, email: &str, phone: &str) -> (Uuid, String) {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "bloodGroup": "O+",
            "location": "Springfield",
            "phoneNumber": phone,
        });

        let response = self.request("POST", "/api/auth/signup", Some(body), None).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Signup failed: {:?}",
            response.body
        );

        let id = response.body["donor"]["id"]
            .as_str()
            .expect("No donor id in signup response")
            .parse()
            .unwrap();
        let token = response.body["token"]
            .as_str()
            .expect("No token in signup response")
            .to_string();
        (id, token)
    }

    /// Create an admin account directly and return (id, token)
    pub async fn create_admin(&self, email: &str) -> (Uuid, String) {
        let hasher = bloodlink_auth::password::hasher::PasswordHasher::new();
        let hash = hasher
            .hash_password(TEST_PASSWORD)
            .expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO donors (id, name, email, phone_number, password_hash, blood_group, location, role) \
             VALUES ($1, $2, $3, $4, $5, 'AB+'::blood_group, 'HQ', 'admin'::donor_role)",
        )
        .bind(id)
        .bind("Admin")
        .bind(email)
        .bind(format!("+1999{}", &id.simple().to_string()[..8]))
        .bind(&hash)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create admin");

        let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
        let response = self.request("POST", "/api/admin/login", Some(body), None).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Admin login failed: {:?}",
            response.body
        );

        let token = response.body["token"].as_str().unwrap().to_string();
        (id, token)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
