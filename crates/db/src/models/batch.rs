//! Batch entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use edupulse_core::enrollment::seats_available;
use edupulse_core::types::{DbId, Timestamp};

/// A row from the `batches` table.
///
/// `current_enrolled` is a denormalized count of live enrollment rows.
/// It is written only by the enrollment engine (reserve/release) and never
/// accepted from API clients.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Batch {
    pub id: DbId,
    pub course_id: DbId,
    pub start_date: Timestamp,
    pub max_seats: i32,
    pub current_enrolled: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Batch {
    /// Free seats remaining in this batch.
    pub fn seats_left(&self) -> i32 {
        seats_available(self.max_seats, self.current_enrolled)
    }
}

/// Batch joined with a summary of its owning course, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BatchWithCourse {
    pub id: DbId,
    pub course_id: DbId,
    pub start_date: Timestamp,
    pub max_seats: i32,
    pub current_enrolled: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub course_title: String,
    pub course_price_cents: i64,
}

/// DTO for creating a new batch. The enrolled counter always starts at 0.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBatch {
    pub course_id: DbId,
    pub start_date: Timestamp,
    pub max_seats: i32,
}

/// DTO for updating an existing batch.
///
/// `current_enrolled` is deliberately absent: the counter is derived state
/// owned by the enrollment engine.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBatch {
    pub start_date: Option<Timestamp>,
    pub max_seats: Option<i32>,
}
