//! Repository for the `enrollments` table -- the enrollment ledger.
//!
//! Holds one row per live (user, batch) booking. The `uq_enrollments_user_batch`
//! constraint is the storage-level backstop for the no-double-booking
//! invariant; the engine still checks explicitly inside its transaction so
//! the caller gets a domain error instead of a raw constraint violation.

use sqlx::PgPool;
use uuid::Uuid;

use edupulse_core::enrollment::EnrollmentStatus;
use edupulse_core::types::{DbId, EnrollmentId};

use crate::models::enrollment::{Enrollment, EnrollmentDetail};
use crate::DbTransaction;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, batch_id, status, progress, created_at, updated_at";

/// Joined column list hydrating an enrollment with batch, course, and user
/// summaries.
const DETAIL_COLUMNS: &str = "e.id, e.user_id, e.batch_id, e.status, e.progress, \
    e.created_at, \
    b.start_date AS batch_start_date, b.max_seats AS batch_max_seats, \
    c.id AS course_id, c.title AS course_title, \
    u.email AS user_email, u.role AS user_role";

/// Shared FROM/JOIN clause for detail queries.
const DETAIL_JOINS: &str = "FROM enrollments e \
    JOIN batches b ON b.id = e.batch_id \
    JOIN courses c ON c.id = b.course_id \
    JOIN users u ON u.id = e.user_id";

/// Provides ledger operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert a PENDING enrollment row with a fresh random id.
    ///
    /// Transaction-scoped: the engine pairs this with the capacity increment
    /// so the two writes commit or roll back together.
    pub async fn insert_pending(
        tx: &mut DbTransaction<'_>,
        user_id: DbId,
        batch_id: DbId,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (id, user_id, batch_id, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(batch_id)
            .bind(EnrollmentStatus::Pending.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether a live enrollment exists for this (user, batch) pair.
    ///
    /// Transaction-scoped so the duplicate check sees writes made under the
    /// batch row lock, not a stale snapshot.
    pub async fn exists_for_user_and_batch(
        tx: &mut DbTransaction<'_>,
        user_id: DbId,
        batch_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(EnrollmentId,)> =
            sqlx::query_as("SELECT id FROM enrollments WHERE user_id = $1 AND batch_id = $2")
                .bind(user_id)
                .bind(batch_id)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(row.is_some())
    }

    /// Find an enrollment by its id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EnrollmentId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an enrollment for a (user, batch) pair.
    pub async fn find_by_user_and_batch(
        pool: &PgPool,
        user_id: DbId,
        batch_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM enrollments WHERE user_id = $1 AND batch_id = $2");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(batch_id)
            .fetch_optional(pool)
            .await
    }

    /// Set an enrollment's status. Re-setting the current status is a no-op
    /// success. Returns `None` if the enrollment does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: EnrollmentId,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Remove an enrollment row. Transaction-scoped: the engine pairs this
    /// with the capacity decrement. Returns `true` if a row was removed.
    pub async fn remove(
        tx: &mut DbTransaction<'_>,
        id: EnrollmentId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hydrated view of a single enrollment.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: EnrollmentId,
    ) -> Result<Option<EnrollmentDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE e.id = $1");
        sqlx::query_as::<_, EnrollmentDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All enrollments for a user, newest first, hydrated with batch and
    /// course context.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EnrollmentDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS}
             WHERE e.user_id = $1
             ORDER BY e.created_at DESC"
        );
        sqlx::query_as::<_, EnrollmentDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All enrollments for a batch, newest first, hydrated with user context.
    pub async fn list_for_batch(
        pool: &PgPool,
        batch_id: DbId,
    ) -> Result<Vec<EnrollmentDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS}
             WHERE e.batch_id = $1
             ORDER BY e.created_at DESC"
        );
        sqlx::query_as::<_, EnrollmentDetail>(&query)
            .bind(batch_id)
            .fetch_all(pool)
            .await
    }

    /// Count live enrollment rows for a batch. Used by consistency checks in
    /// tests and maintenance tooling, not by the hot path.
    pub async fn count_for_batch(pool: &PgPool, batch_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM enrollments WHERE batch_id = $1")
            .bind(batch_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
