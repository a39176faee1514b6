//! Handlers for the `/enrollments` resource -- the service facade over the
//! enrollment transaction engine.
//!
//! Handlers here hold no state and enforce no invariants of their own: they
//! translate the verified `(user_id, role)` context into engine calls and let
//! [`AppError`]'s response mapping turn engine outcomes into status codes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use edupulse_core::enrollment::EnrollmentStatus;
use edupulse_core::types::{DbId, EnrollmentId};
use edupulse_db::models::enrollment::EnrollmentDetail;
use edupulse_db::repositories::EnrollmentRepo;

use crate::engine::EnrollmentEngine;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireInstructor;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /enrollments`.
#[derive(Debug, Deserialize)]
pub struct CreateEnrollmentRequest {
    pub batch_id: DbId,
}

/// Request body for `PATCH /enrollments/{id}/status`.
///
/// The status arrives as a string and is parsed so unknown values produce a
/// 400 with a message naming the accepted set, not a bare deserialize error.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// POST /api/v1/enrollments
///
/// Book a seat in a batch for the authenticated user.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateEnrollmentRequest>,
) -> AppResult<(StatusCode, Json<EnrollmentDetail>)> {
    let enrollment = EnrollmentEngine::create(&state.pool, auth.user_id, input.batch_id).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /api/v1/enrollments/my-enrollments
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<EnrollmentDetail>>> {
    let enrollments = EnrollmentRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(enrollments))
}

/// GET /api/v1/enrollments/batch/{batch_id} (instructor/admin)
pub async fn list_for_batch(
    State(state): State<AppState>,
    RequireInstructor(_user): RequireInstructor,
    Path(batch_id): Path<DbId>,
) -> AppResult<Json<Vec<EnrollmentDetail>>> {
    let enrollments = EnrollmentRepo::list_for_batch(&state.pool, batch_id).await?;
    Ok(Json(enrollments))
}

/// PATCH /api/v1/enrollments/{id}/status (instructor/admin)
///
/// Idempotent: re-setting the current status succeeds with the same state.
pub async fn set_status(
    State(state): State<AppState>,
    RequireInstructor(_user): RequireInstructor,
    Path(id): Path<EnrollmentId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<EnrollmentDetail>> {
    let status: EnrollmentStatus = input.status.parse()?;
    let enrollment = EnrollmentEngine::set_status(&state.pool, id, status).await?;
    Ok(Json(enrollment))
}

/// DELETE /api/v1/enrollments/{id}
///
/// Students can cancel their own enrollments; admins can cancel any.
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EnrollmentId>,
) -> AppResult<Json<MessageResponse>> {
    EnrollmentEngine::cancel(&state.pool, id, auth.user_id, &auth.role).await?;
    Ok(Json(MessageResponse {
        message: "Enrollment cancelled successfully",
    }))
}
