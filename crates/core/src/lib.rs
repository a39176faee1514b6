//! Domain layer shared by the database and API crates.
//!
//! Pure types only -- no I/O, no sqlx, no axum. The enrollment status
//! machine, role constants, and the error taxonomy live here so the
//! repositories and the HTTP layer agree on a single vocabulary.

pub mod enrollment;
pub mod error;
pub mod roles;
pub mod types;
