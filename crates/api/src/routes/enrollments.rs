//! Route definitions for the `/enrollments` resource.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::enrollments;
use crate::state::AppState;

/// Routes mounted at `/enrollments`.
///
/// ```text
/// POST   /                    -> create (book a seat, requires auth)
/// GET    /my-enrollments      -> list_mine (requires auth)
/// GET    /batch/{batch_id}    -> list_for_batch (instructor/admin)
/// PATCH  /{id}/status         -> set_status (instructor/admin)
/// DELETE /{id}                -> cancel (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(enrollments::create))
        .route("/my-enrollments", get(enrollments::list_mine))
        .route("/batch/{batch_id}", get(enrollments::list_for_batch))
        .route("/{id}/status", patch(enrollments::set_status))
        .route("/{id}", delete(enrollments::cancel))
}
