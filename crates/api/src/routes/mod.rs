//! Route tree for the API.

pub mod auth;
pub mod batches;
pub mod courses;
pub mod enrollments;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/me                           profile (requires auth)
/// /auth/account                      delete account (requires auth)
///
/// /courses                           list (public), create (instructor/admin)
/// /courses/{id}                      get (public), update (instructor/admin),
///                                    delete (admin)
///
/// /batches                           list (public), create (instructor/admin)
/// /batches/available                 upcoming batches with free seats (public)
/// /batches/{id}                      get (public), update (instructor/admin),
///                                    delete (admin)
///
/// /enrollments                       book a seat (requires auth)
/// /enrollments/my-enrollments        own bookings (requires auth)
/// /enrollments/batch/{batch_id}      batch roster (instructor/admin)
/// /enrollments/{id}/status           set status (instructor/admin)
/// /enrollments/{id}                  cancel (owner or admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/courses", courses::router())
        .nest("/batches", batches::router())
        .nest("/enrollments", enrollments::router())
}
