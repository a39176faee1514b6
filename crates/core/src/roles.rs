//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in the migrations.

pub const ROLE_STUDENT: &str = "STUDENT";
pub const ROLE_INSTRUCTOR: &str = "INSTRUCTOR";
pub const ROLE_ADMIN: &str = "ADMIN";

/// All roles a user may register with or be assigned.
pub const ALL_ROLES: [&str; 3] = [ROLE_STUDENT, ROLE_INSTRUCTOR, ROLE_ADMIN];

/// Returns `true` if `role` is one of the known role names.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
