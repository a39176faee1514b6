//! Enrollment status machine and seat arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status of an enrollment attempt.
///
/// The only legal transition is PENDING -> CONFIRMED; cancellation removes
/// the record entirely rather than introducing a third status. Re-setting
/// the current status is a no-op success, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
}

impl EnrollmentStatus {
    /// Database representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "PENDING",
            EnrollmentStatus::Confirmed => "CONFIRMED",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(EnrollmentStatus::Pending),
            "CONFIRMED" => Ok(EnrollmentStatus::Confirmed),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be PENDING or CONFIRMED"
            ))),
        }
    }
}

/// Number of free seats in a batch given its capacity and occupancy.
///
/// Saturates at zero; occupancy above capacity indicates a broken invariant
/// and is still reported as zero free seats.
pub fn seats_available(max_seats: i32, current_enrolled: i32) -> i32 {
    (max_seats - current_enrolled).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_db_representation() {
        for status in [EnrollmentStatus::Pending, EnrollmentStatus::Confirmed] {
            let parsed: EnrollmentStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_invalid_status_is_a_validation_error() {
        let err = "CANCELLED".parse::<EnrollmentStatus>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("PENDING or CONFIRMED"));
    }

    #[test]
    fn test_seats_available_floors_at_zero() {
        assert_eq!(seats_available(30, 12), 18);
        assert_eq!(seats_available(30, 30), 0);
        // Occupancy above capacity must never yield negative availability.
        assert_eq!(seats_available(30, 31), 0);
    }
}
