//! Blood request repository implementation.
//!
//! Every transition out of `pending` is a conditional update keyed on the
//! expected prior status. Two racing transitions cannot both match the
//! `status = 'pending'` predicate, so at most one wins; the loser observes
//! zero updated rows.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bloodlink_core::error::{AppError, ErrorKind};
use bloodlink_core::result::AppResult;
use bloodlink_core::types::pagination::{PageRequest, PageResponse};
use bloodlink_entity::request::{BloodRequest, RequestStatus};

/// Which side of the request history to list for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDirection {
    /// Requests the account initiated.
    Sent,
    /// Requests targeting the account as donor.
    Received,
    /// Both directions.
    All,
}

/// Repository for blood request persistence and lifecycle transitions.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new request in the `pending` state.
    pub async fn create(
        &self,
        requester_id: Uuid,
        donor_id: Uuid,
        note: Option<&str>,
    ) -> AppResult<BloodRequest> {
        sqlx::query_as::<_, BloodRequest>(
            "INSERT INTO blood_requests (requester_id, donor_id, note) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(requester_id)
        .bind(donor_id)
        .bind(note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }

    /// Find a request by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>("SELECT * FROM blood_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find request by id", e)
            })
    }

    /// List requests involving an account, newest first.
    pub async fn list_for_account(
        &self,
        account_id: Uuid,
        direction: RequestDirection,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BloodRequest>> {
        let predicate = match direction {
            RequestDirection::Sent => "requester_id = $1",
            RequestDirection::Received => "donor_id = $1",
            RequestDirection::All => "(requester_id = $1 OR donor_id = $1)",
        };

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM blood_requests WHERE {predicate}"))
                .bind(account_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count requests", e)
                })?;

        let requests = sqlx::query_as::<_, BloodRequest>(&format!(
            "SELECT * FROM blood_requests WHERE {predicate} \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(account_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List completed requests involving an account (donation history).
    pub async fn history_for_account(
        &self,
        account_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BloodRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM blood_requests \
             WHERE status = 'completed' AND (requester_id = $1 OR donor_id = $1)",
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count history", e))?;

        let requests = sqlx::query_as::<_, BloodRequest>(
            "SELECT * FROM blood_requests \
             WHERE status = 'completed' AND (requester_id = $1 OR donor_id = $1) \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(account_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list history", e))?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List all requests, newest first (admin view).
    pub async fn list_all(&self, page: &PageRequest) -> AppResult<PageResponse<BloodRequest>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blood_requests")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count requests", e)
            })?;

        let requests = sqlx::query_as::<_, BloodRequest>(
            "SELECT * FROM blood_requests ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count requests currently in the `pending` state.
    pub async fn count_pending(&self) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blood_requests WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count pending", e)
                })?;
        Ok(count as u64)
    }

    /// Atomically move a request out of `pending` into a terminal state.
    ///
    /// Returns `None` when the request is not currently `pending` (either it
    /// never existed or a racing transition already won); the caller decides
    /// how to report that.
    pub async fn transition_from_pending(
        &self,
        id: Uuid,
        new_status: RequestStatus,
        note: Option<&str>,
    ) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests \
             SET status = $2, note = COALESCE($3, note), updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .bind(new_status)
        .bind(note)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to transition request", e))
    }

    /// Atomically complete a pending request and apply the side effects on
    /// the donor row (rating aggregate and cooldown) in the same
    /// transaction, so racing completions cannot lose updates.
    pub async fn complete_from_pending(
        &self,
        id: Uuid,
        rating: Option<i32>,
        next_available_at: DateTime<Utc>,
    ) -> AppResult<Option<BloodRequest>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let request = sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests \
             SET status = 'completed', rating = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .bind(rating)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete request", e))?;

        let Some(request) = request else {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(None);
        };

        sqlx::query(
            "UPDATE donors \
             SET rating_sum = rating_sum + COALESCE($2, 0), \
                 rating_count = rating_count + CASE WHEN $2 IS NULL THEN 0 ELSE 1 END, \
                 next_available_at = $3, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(request.donor_id)
        .bind(rating)
        .bind(next_available_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update donor aggregates", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(Some(request))
    }
}
