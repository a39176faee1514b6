//! Route definitions for the `/courses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /      -> list (public)
/// POST   /      -> create (instructor/admin)
/// GET    /{id}  -> get_by_id (public)
/// PATCH  /{id}  -> update (instructor/admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list).post(courses::create))
        .route(
            "/{id}",
            get(courses::get_by_id)
                .patch(courses::update)
                .delete(courses::delete),
        )
}
