//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that participate in an
//! atomic unit of work (the enrollment engine's create/cancel, counter
//! reconciliation) take `&mut DbTransaction` instead so the caller controls
//! commit and rollback.

pub mod batch_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod user_repo;

pub use batch_repo::BatchRepo;
pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use user_repo::UserRepo;
