/// Primary keys for users, courses, and batches are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Enrollment ids are random UUIDs so booking ids are not guessable
/// sequential integers.
pub type EnrollmentId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
