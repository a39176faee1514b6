//! The enrollment transaction engine.
//!
//! Orchestrates atomic create/confirm/cancel operations spanning the batch
//! capacity store and the enrollment ledger.

pub mod enrollment;

pub use enrollment::EnrollmentEngine;
