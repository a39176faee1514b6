//! Route definitions for the `/batches` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::batches;
use crate::state::AppState;

/// Routes mounted at `/batches`.
///
/// ```text
/// GET    /            -> list (public, ?course_id= filter)
/// POST   /            -> create (instructor/admin)
/// GET    /available   -> list_available (public)
/// GET    /{id}        -> get_by_id (public)
/// PATCH  /{id}        -> update (instructor/admin)
/// DELETE /{id}        -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(batches::list).post(batches::create))
        .route("/available", get(batches::list_available))
        .route(
            "/{id}",
            get(batches::get_by_id)
                .patch(batches::update)
                .delete(batches::delete),
        )
}
