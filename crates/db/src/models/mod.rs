//! Entity models and DTOs, one module per table.

pub mod batch;
pub mod course;
pub mod enrollment;
pub mod user;
