//! Donor repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bloodlink_core::error::{AppError, ErrorKind};
use bloodlink_core::result::AppResult;
use bloodlink_core::types::pagination::{PageRequest, PageResponse};
use bloodlink_entity::donor::{AdminUpdateDonor, BloodGroup, CreateDonor, Donor, DonorStatus};

/// Filters for the admin donor listing.
#[derive(Debug, Clone, Default)]
pub struct DonorFilter {
    /// Free-text match against name or email.
    pub query: Option<String>,
    /// Exact blood group.
    pub blood_group: Option<BloodGroup>,
    /// Account status.
    pub status: Option<DonorStatus>,
    /// Substring match against location.
    pub location: Option<String>,
}

/// Repository for donor CRUD and query operations.
#[derive(Debug, Clone)]
pub struct DonorRepository {
    pool: PgPool,
}

impl DonorRepository {
    /// Create a new donor repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a donor by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donor>> {
        sqlx::query_as::<_, Donor>("SELECT * FROM donors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find donor by id", e)
            })
    }

    /// Find a donor by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Donor>> {
        sqlx::query_as::<_, Donor>("SELECT * FROM donors WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find donor by email", e)
            })
    }

    /// Find a donor by phone number.
    pub async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<Donor>> {
        sqlx::query_as::<_, Donor>("SELECT * FROM donors WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find donor by phone", e)
            })
    }

    /// Create a new donor account.
    pub async fn create(&self, data: &CreateDonor) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>(
            "INSERT INTO donors (name, email, phone_number, password_hash, blood_group, location, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone_number)
        .bind(&data.password_hash)
        .bind(data.blood_group)
        .bind(&data.location)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("donors_email_key") => {
                AppError::conflict("Email is already registered".to_string())
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("donors_phone_number_key") =>
            {
                AppError::conflict("Phone number is already registered".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create donor", e),
        })
    }

    /// Update a donor's self-editable profile fields.
    pub async fn update_profile(
        &self,
        donor_id: Uuid,
        name: Option<&str>,
        location: Option<&str>,
        phone_number: Option<&str>,
    ) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>(
            "UPDATE donors SET name = COALESCE($2, name), \
                               location = COALESCE($3, location), \
                               phone_number = COALESCE($4, phone_number), \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(donor_id)
        .bind(name)
        .bind(location)
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("donors_phone_number_key") =>
            {
                AppError::conflict("Phone number is already registered".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update profile", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Donor {donor_id} not found")))
    }

    /// Apply an administrative edit to a donor.
    pub async fn admin_update(&self, donor_id: Uuid, data: &AdminUpdateDonor) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>(
            "UPDATE donors SET name = COALESCE($2, name), \
                               email = COALESCE($3, email), \
                               blood_group = COALESCE($4, blood_group), \
                               location = COALESCE($5, location), \
                               phone_number = COALESCE($6, phone_number), \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(donor_id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.blood_group)
        .bind(&data.location)
        .bind(&data.phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("donors_email_key") => {
                AppError::conflict("Email is already registered".to_string())
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("donors_phone_number_key") =>
            {
                AppError::conflict("Phone number is already registered".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update donor", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Donor {donor_id} not found")))
    }

    /// Update a donor's account status.
    pub async fn update_status(&self, donor_id: Uuid, status: DonorStatus) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>(
            "UPDATE donors SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(donor_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?
        .ok_or_else(|| AppError::not_found(format!("Donor {donor_id} not found")))
    }

    /// Update a donor's verified flag.
    pub async fn update_verified(&self, donor_id: Uuid, verified: bool) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>(
            "UPDATE donors SET verified = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(donor_id)
        .bind(verified)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update verified", e))?
        .ok_or_else(|| AppError::not_found(format!("Donor {donor_id} not found")))
    }

    /// Update a donor's password hash.
    pub async fn update_password(&self, donor_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE donors SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(donor_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Donor {donor_id} not found")));
        }
        Ok(())
    }

    /// Update last login timestamp.
    pub async fn update_last_login(&self, donor_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE donors SET last_login_at = NOW() WHERE id = $1")
            .bind(donor_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }

    /// Delete a donor by ID.
    pub async fn delete(&self, donor_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM donors WHERE id = $1")
            .bind(donor_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete donor", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Search active, currently-available donors by location and optional
    /// blood group, excluding the searching account itself.
    ///
    /// Availability is evaluated against the database clock at query time:
    /// a donor inside a cooldown window never appears in results.
    pub async fn search_available(
        &self,
        location: &str,
        blood_group: Option<BloodGroup>,
        exclude_id: Uuid,
    ) -> AppResult<Vec<Donor>> {
        let pattern = format!("%{location}%");

        sqlx::query_as::<_, Donor>(
            "SELECT * FROM donors \
             WHERE status = 'active' \
               AND (next_available_at IS NULL OR next_available_at <= NOW()) \
               AND id <> $1 \
               AND location ILIKE $2 \
               AND ($3::blood_group IS NULL OR blood_group = $3) \
             ORDER BY verified DESC, name ASC",
        )
        .bind(exclude_id)
        .bind(&pattern)
        .bind(blood_group)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search donors", e))
    }

    /// List donors for the admin view with optional filters and pagination.
    pub async fn find_filtered(
        &self,
        filter: &DonorFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Donor>> {
        let query_pattern = filter.query.as_ref().map(|q| format!("%{q}%"));
        let location_pattern = filter.location.as_ref().map(|l| format!("%{l}%"));

        let where_clause = "WHERE ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1) \
               AND ($2::blood_group IS NULL OR blood_group = $2) \
               AND ($3::donor_status IS NULL OR status = $3) \
               AND ($4::text IS NULL OR location ILIKE $4)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM donors {where_clause}"))
            .bind(&query_pattern)
            .bind(filter.blood_group)
            .bind(filter.status)
            .bind(&location_pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count donors", e))?;

        let donors = sqlx::query_as::<_, Donor>(&format!(
            "SELECT * FROM donors {where_clause} ORDER BY created_at DESC LIMIT $5 OFFSET $6"
        ))
        .bind(&query_pattern)
        .bind(filter.blood_group)
        .bind(filter.status)
        .bind(&location_pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list donors", e))?;

        Ok(PageResponse::new(
            donors,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count all donor accounts.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donors")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count donors", e))?;
        Ok(count as u64)
    }

    /// Count donors per blood group.
    pub async fn count_by_blood_group(&self) -> AppResult<Vec<(BloodGroup, i64)>> {
        sqlx::query_as::<_, (BloodGroup, i64)>(
            "SELECT blood_group, COUNT(*) FROM donors GROUP BY blood_group",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count donors by group", e)
        })
    }

    /// Overwrite a donor's cooldown expiry.
    ///
    /// Used by administrative corrections; the completion flow updates the
    /// cooldown atomically inside the request transaction instead.
    pub async fn set_next_available_at(
        &self,
        donor_id: Uuid,
        next_available_at: Option<DateTime<Utc>>,
    ) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>(
            "UPDATE donors SET next_available_at = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(donor_id)
        .bind(next_available_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update availability", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Donor {donor_id} not found")))
    }
}
