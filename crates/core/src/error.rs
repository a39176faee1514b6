/// Domain-level error taxonomy.
///
/// Constructed at the point of detection (usually inside the enrollment
/// engine or a repository) and propagated unchanged up to the HTTP layer,
/// which maps each variant 1:1 to a response category. None of these are
/// retried internally -- they describe the true current state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The batch has no seats left (`current_enrolled >= max_seats`).
    #[error("Batch {batch_id} is full, no seats available")]
    BatchFull { batch_id: i64 },

    /// A live enrollment already exists for this (user, batch) pair.
    #[error("User {user_id} is already enrolled in batch {batch_id}")]
    AlreadyEnrolled { user_id: i64, batch_id: i64 },

    /// An administrative capacity edit would drop `max_seats` below the
    /// number of currently enrolled students.
    #[error("Cannot set max_seats to {requested}: batch {batch_id} already has {enrolled} enrolled")]
    CapacityBelowEnrolled {
        batch_id: i64,
        requested: i32,
        enrolled: i32,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
