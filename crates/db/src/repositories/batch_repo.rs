//! Repository for the `batches` table -- the capacity store.
//!
//! Besides plain CRUD, this repository owns the seat-accounting primitives
//! the enrollment engine composes inside a transaction:
//!
//! - [`BatchRepo::lock_for_update`] takes a `FOR UPDATE` row lock so
//!   check-and-increment sequences on the same batch cannot interleave.
//! - [`BatchRepo::reserve_seat`] / [`BatchRepo::release_seat`] are guarded
//!   conditional UPDATEs that refuse to overbook or to decrement past zero.

use sqlx::PgPool;

use edupulse_core::error::CoreError;
use edupulse_core::types::DbId;

use crate::models::batch::{Batch, BatchWithCourse, CreateBatch, UpdateBatch};
use crate::DbTransaction;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, course_id, start_date, max_seats, current_enrolled, created_at, updated_at";

/// Joined column list for batch + course summary queries.
const JOINED_COLUMNS: &str = "b.id, b.course_id, b.start_date, b.max_seats, \
    b.current_enrolled, b.created_at, b.updated_at, \
    c.title AS course_title, c.price_cents AS course_price_cents";

/// Failure modes of [`BatchRepo::update`].
#[derive(Debug, thiserror::Error)]
pub enum UpdateBatchError {
    /// The requested `max_seats` is below the current occupancy.
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Provides CRUD and atomic seat accounting for batches.
pub struct BatchRepo;

impl BatchRepo {
    /// Insert a new batch with an empty enrolled counter.
    pub async fn create(pool: &PgPool, input: &CreateBatch) -> Result<Batch, sqlx::Error> {
        let query = format!(
            "INSERT INTO batches (course_id, start_date, max_seats, current_enrolled)
             VALUES ($1, $2, $3, 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(input.course_id)
            .bind(input.start_date)
            .bind(input.max_seats)
            .fetch_one(pool)
            .await
    }

    /// Find a batch by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM batches WHERE id = $1");
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List batches with their course summary, optionally filtered by course,
    /// ordered by start date ascending.
    pub async fn list(
        pool: &PgPool,
        course_id: Option<DbId>,
    ) -> Result<Vec<BatchWithCourse>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM batches b
             JOIN courses c ON c.id = b.course_id
             WHERE ($1::BIGINT IS NULL OR b.course_id = $1)
             ORDER BY b.start_date ASC"
        );
        sqlx::query_as::<_, BatchWithCourse>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List upcoming batches that still have free seats.
    pub async fn list_available(pool: &PgPool) -> Result<Vec<BatchWithCourse>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM batches b
             JOIN courses c ON c.id = b.course_id
             WHERE b.current_enrolled < b.max_seats AND b.start_date >= NOW()
             ORDER BY b.start_date ASC"
        );
        sqlx::query_as::<_, BatchWithCourse>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a batch's schedule and/or capacity.
    ///
    /// The capacity floor is enforced in the same statement that writes:
    /// `max_seats` may never drop below `current_enrolled`, so an
    /// administrative shrink cannot race a concurrent enrollment. When the
    /// guard rejects the write, the failure path re-reads the row to
    /// distinguish "batch absent" from "capacity below occupancy".
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBatch,
    ) -> Result<Option<Batch>, UpdateBatchError> {
        let query = format!(
            "UPDATE batches SET
                start_date = COALESCE($2, start_date),
                max_seats = COALESCE($3, max_seats),
                updated_at = NOW()
             WHERE id = $1 AND COALESCE($3, max_seats) >= current_enrolled
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .bind(input.start_date)
            .bind(input.max_seats)
            .fetch_optional(pool)
            .await?;

        if let Some(batch) = updated {
            return Ok(Some(batch));
        }

        match Self::find_by_id(pool, id).await? {
            None => Ok(None),
            Some(batch) => Err(UpdateBatchError::Core(CoreError::CapacityBelowEnrolled {
                batch_id: id,
                // The guard only fails with an explicit max_seats request.
                requested: input.max_seats.unwrap_or(batch.max_seats),
                enrolled: batch.current_enrolled,
            })),
        }
    }

    /// Delete a batch by ID. The FK cascade clears its enrollment rows in the
    /// same statement, so the two can never diverge. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Engine primitives (transaction-scoped) --

    /// Load a batch and take a `FOR UPDATE` row lock for the rest of the
    /// transaction. All of the engine's read-then-write sequences on a batch
    /// start here, which serializes them per batch id.
    pub async fn lock_for_update(
        tx: &mut DbTransaction<'_>,
        id: DbId,
    ) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM batches WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Atomically claim one seat: increments `current_enrolled` only while
    /// it is below `max_seats`. Returns `true` if a seat was reserved.
    pub async fn reserve_seat(
        tx: &mut DbTransaction<'_>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE batches
             SET current_enrolled = current_enrolled + 1, updated_at = NOW()
             WHERE id = $1 AND current_enrolled < max_seats",
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically release one seat, flooring at zero. Returns `true` if the
    /// counter was decremented; `false` means it was already zero, which the
    /// caller must treat as a broken invariant rather than wrap around.
    pub async fn release_seat(
        tx: &mut DbTransaction<'_>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE batches
             SET current_enrolled = current_enrolled - 1, updated_at = NOW()
             WHERE id = $1 AND current_enrolled > 0",
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
