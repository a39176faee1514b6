//! Enrollment entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use edupulse_core::types::{DbId, EnrollmentId, Timestamp};

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: DbId,
    pub batch_id: DbId,
    pub status: String,
    /// 0-100, owned by progress tracking, not the booking engine.
    pub progress: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Enrollment hydrated with batch, course, and user summaries.
///
/// This is the shape the engine returns to the facade: the caller gets the
/// booking plus enough context to render it without further lookups.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrollmentDetail {
    pub id: EnrollmentId,
    pub user_id: DbId,
    pub batch_id: DbId,
    pub status: String,
    pub progress: i32,
    pub created_at: Timestamp,
    pub batch_start_date: Timestamp,
    pub batch_max_seats: i32,
    pub course_id: DbId,
    pub course_title: String,
    pub user_email: String,
    pub user_role: String,
}
