//! Enrollment transaction engine: atomic seat booking against capacity-bounded
//! batches.
//!
//! Every mutation here spans two stores -- the denormalized seat counter on
//! `batches` and the enrollment rows themselves -- so each operation runs in
//! a single database transaction. Serialization per batch comes from the
//! `SELECT ... FOR UPDATE` row lock taken at the start of the transaction:
//! two concurrent `create` calls on the same batch cannot both observe a free
//! seat before either writes. Operations on different batches do not contend.
//!
//! Domain errors ([`CoreError`]) describe the true current state and are
//! never retried here; transient sqlx failures propagate to the HTTP layer,
//! which surfaces them as retryable 503s. If anything fails mid-transaction
//! the unit of work rolls back on drop, so a ledger row without its counter
//! increment (or vice versa) is never observable.

use edupulse_core::enrollment::EnrollmentStatus;
use edupulse_core::error::CoreError;
use edupulse_core::roles::ROLE_ADMIN;
use edupulse_core::types::{DbId, EnrollmentId};

use edupulse_db::models::enrollment::EnrollmentDetail;
use edupulse_db::repositories::{BatchRepo, EnrollmentRepo};
use edupulse_db::DbPool;

use crate::error::{AppError, AppResult};

/// Stateless facade over the booking transaction logic.
pub struct EnrollmentEngine;

impl EnrollmentEngine {
    /// Book a seat: insert a PENDING enrollment and claim one seat, atomically.
    ///
    /// Check order (matching the documented booking semantics):
    /// 1. batch must exist,
    /// 2. batch must have a free seat,
    /// 3. the user must not already hold a live enrollment in it.
    ///
    /// Returns the created enrollment hydrated with batch, course, and user
    /// summaries.
    pub async fn create(
        pool: &DbPool,
        user_id: DbId,
        batch_id: DbId,
    ) -> AppResult<EnrollmentDetail> {
        let mut tx = pool.begin().await?;

        // Row lock: serializes every check-and-increment on this batch.
        let batch = BatchRepo::lock_for_update(&mut tx, batch_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Batch",
                id: batch_id.to_string(),
            }))?;

        if batch.current_enrolled >= batch.max_seats {
            return Err(AppError::Core(CoreError::BatchFull { batch_id }));
        }

        if EnrollmentRepo::exists_for_user_and_batch(&mut tx, user_id, batch_id)
            .await?
        {
            return Err(AppError::Core(CoreError::AlreadyEnrolled {
                user_id,
                batch_id,
            }));
        }

        let enrollment = EnrollmentRepo::insert_pending(&mut tx, user_id, batch_id)
            .await?;

        // Cannot fail under the row lock; if it does, the ledger insert must
        // not survive either.
        let reserved = BatchRepo::reserve_seat(&mut tx, batch_id)
            .await?;
        if !reserved {
            return Err(AppError::Core(CoreError::Internal(format!(
                "seat reservation lost for batch {batch_id} despite row lock"
            ))));
        }

        tx.commit().await?;

        tracing::info!(
            user_id,
            batch_id,
            enrollment_id = %enrollment.id,
            "enrollment created"
        );

        let detail = EnrollmentRepo::find_detail_by_id(pool, enrollment.id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "enrollment {} vanished after commit",
                    enrollment.id
                ))
            })?;
        Ok(detail)
    }

    /// Set an enrollment's status (PENDING or CONFIRMED).
    ///
    /// Pure status transition with no capacity effect -- the seat was
    /// reserved at create time. Re-setting the current status is a no-op
    /// success.
    pub async fn set_status(
        pool: &DbPool,
        enrollment_id: EnrollmentId,
        status: EnrollmentStatus,
    ) -> AppResult<EnrollmentDetail> {
        EnrollmentRepo::set_status(pool, enrollment_id, status)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Enrollment",
                id: enrollment_id.to_string(),
            }))?;

        let detail = EnrollmentRepo::find_detail_by_id(pool, enrollment_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Enrollment",
                id: enrollment_id.to_string(),
            }))?;
        Ok(detail)
    }

    /// Cancel an enrollment: remove the ledger row and release its seat,
    /// atomically.
    ///
    /// Students may cancel only their own enrollments; admins may cancel any.
    pub async fn cancel(
        pool: &DbPool,
        enrollment_id: EnrollmentId,
        requesting_user_id: DbId,
        requesting_role: &str,
    ) -> AppResult<()> {
        let enrollment = EnrollmentRepo::find_by_id(pool, enrollment_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Enrollment",
                id: enrollment_id.to_string(),
            }))?;

        if requesting_role != ROLE_ADMIN && enrollment.user_id != requesting_user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "You can only cancel your own enrollments".into(),
            )));
        }

        let mut tx = pool.begin().await?;

        // Lock the batch first so cancel serializes with concurrent creates
        // on the same batch and with duplicate cancels of this enrollment.
        BatchRepo::lock_for_update(&mut tx, enrollment.batch_id)
            .await?;

        let removed = EnrollmentRepo::remove(&mut tx, enrollment_id)
            .await?;
        if !removed {
            // Lost a race with another cancel; nothing to release.
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Enrollment",
                id: enrollment_id.to_string(),
            }));
        }

        let released = BatchRepo::release_seat(&mut tx, enrollment.batch_id)
            .await?;
        if !released {
            // A live enrollment existed with a zero counter: the derived
            // count drifted. Report loudly and roll back rather than wrap.
            tracing::error!(
                batch_id = enrollment.batch_id,
                enrollment_id = %enrollment_id,
                "seat counter already zero while a live enrollment existed"
            );
            return Err(AppError::Core(CoreError::Internal(format!(
                "seat counter underflow for batch {}",
                enrollment.batch_id
            ))));
        }

        tx.commit().await?;

        tracing::info!(
            batch_id = enrollment.batch_id,
            enrollment_id = %enrollment_id,
            requested_by = requesting_user_id,
            "enrollment cancelled"
        );
        Ok(())
    }
}
