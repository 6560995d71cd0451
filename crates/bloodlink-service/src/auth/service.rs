//! Signup, login, and password-change flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use bloodlink_auth::jwt::encoder::JwtEncoder;
use bloodlink_auth::password::{PasswordHasher, PasswordValidator};
use bloodlink_core::error::AppError;
use bloodlink_database::repositories::donor::DonorRepository;
use bloodlink_entity::donor::{BloodGroup, CreateDonor, Donor, DonorRole};

use crate::context::RequestContext;

/// Data required to register a donor account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// ABO/Rh blood group.
    pub blood_group: BloodGroup,
    /// Free-text location.
    pub location: String,
    /// Phone number.
    pub phone_number: String,
}

/// Result of a successful login or signup.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Signed bearer token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The authenticated account.
    pub donor: Donor,
}

/// Handles account registration and credential checks.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Donor repository.
    donor_repo: Arc<DonorRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy validator.
    validator: Arc<PasswordValidator>,
    /// JWT encoder.
    jwt_encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        donor_repo: Arc<DonorRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        jwt_encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            donor_repo,
            hasher,
            validator,
            jwt_encoder,
        }
    }

    /// Registers a new donor account and logs it in.
    pub async fn signup(&self, data: SignupData) -> Result<LoginResult, AppError> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if !data.email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        if data.phone_number.trim().is_empty() {
            return Err(AppError::validation("Phone number is required"));
        }
        if data.location.trim().is_empty() {
            return Err(AppError::validation("Location is required"));
        }
        self.validator.validate(&data.password)?;

        // Friendly pre-checks; the unique indexes still backstop races.
        if self.donor_repo.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }
        if self
            .donor_repo
            .find_by_phone(&data.phone_number)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Phone number is already registered"));
        }

        let password_hash = self.hasher.hash_password(&data.password)?;

        let donor = self
            .donor_repo
            .create(&CreateDonor {
                name: data.name,
                email: data.email,
                phone_number: data.phone_number,
                password_hash,
                blood_group: data.blood_group,
                location: data.location,
                role: DonorRole::Donor,
            })
            .await?;

        info!(donor_id = %donor.id, "Donor registered");

        self.issue_token(donor)
    }

    /// Authenticates with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let donor = self
            .donor_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        let valid = self
            .hasher
            .verify_password(password, &donor.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Invalid email or password"));
        }

        if !donor.status.is_active() {
            return Err(AppError::forbidden("Account is suspended"));
        }

        self.donor_repo.update_last_login(donor.id).await?;

        info!(donor_id = %donor.id, "Login");

        self.issue_token(donor)
    }

    /// Authenticates an administrator. Identical to [`Self::login`] but
    /// rejects non-admin accounts without revealing whether they exist.
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let result = self.login(email, password).await?;
        if !result.donor.is_admin() {
            return Err(AppError::authentication("Invalid email or password"));
        }
        Ok(result)
    }

    /// Changes the current account's password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let donor = self
            .donor_repo
            .find_by_id(ctx.donor_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))?;

        let valid = self
            .hasher
            .verify_password(current_password, &donor.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.donor_repo
            .update_password(ctx.donor_id, &new_hash)
            .await?;

        info!(donor_id = %ctx.donor_id, "Password changed");

        Ok(())
    }

    /// Checks whether an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.donor_repo.find_by_email(email).await?.is_some())
    }

    /// Checks whether a phone number is already registered.
    pub async fn phone_exists(&self, phone: &str) -> Result<bool, AppError> {
        Ok(self.donor_repo.find_by_phone(phone).await?.is_some())
    }

    fn issue_token(&self, donor: Donor) -> Result<LoginResult, AppError> {
        let (token, expires_at) =
            self.jwt_encoder
                .generate_token(donor.id, donor.role, &donor.email)?;
        Ok(LoginResult {
            token,
            expires_at,
            donor,
        })
    }
}
