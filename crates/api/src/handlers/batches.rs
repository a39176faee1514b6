//! Handlers for the `/batches` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use edupulse_core::error::CoreError;
use edupulse_core::types::DbId;
use edupulse_db::models::batch::{Batch, BatchWithCourse, CreateBatch, UpdateBatch};
use edupulse_db::repositories::{BatchRepo, CourseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireInstructor};
use crate::state::AppState;

/// Query parameters for `GET /batches`.
#[derive(Debug, Deserialize)]
pub struct ListBatchesQuery {
    pub course_id: Option<DbId>,
}

/// POST /api/v1/batches (instructor/admin)
pub async fn create(
    State(state): State<AppState>,
    RequireInstructor(user): RequireInstructor,
    Json(input): Json<CreateBatch>,
) -> AppResult<(StatusCode, Json<Batch>)> {
    if input.max_seats < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Max seats must be at least 1".into(),
        )));
    }

    // Verify the owning course exists so the FK violation surfaces as a 404.
    CourseRepo::find_by_id(&state.pool, input.course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id.to_string(),
        }))?;

    let batch = BatchRepo::create(&state.pool, &input).await?;
    tracing::info!(
        batch_id = batch.id,
        course_id = batch.course_id,
        max_seats = batch.max_seats,
        created_by = user.user_id,
        "batch created"
    );
    Ok((StatusCode::CREATED, Json(batch)))
}

/// GET /api/v1/batches (public, optional `?course_id=` filter)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListBatchesQuery>,
) -> AppResult<Json<Vec<BatchWithCourse>>> {
    let batches = BatchRepo::list(&state.pool, query.course_id).await?;
    Ok(Json(batches))
}

/// GET /api/v1/batches/available (public)
///
/// Upcoming batches that still have free seats.
pub async fn list_available(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BatchWithCourse>>> {
    let batches = BatchRepo::list_available(&state.pool).await?;
    Ok(Json(batches))
}

/// GET /api/v1/batches/{id} (public)
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Batch>> {
    let batch = BatchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id: id.to_string(),
        }))?;
    Ok(Json(batch))
}

/// PATCH /api/v1/batches/{id} (instructor/admin)
///
/// `max_seats` may never drop below the current occupancy; such requests are
/// rejected with 409. `current_enrolled` is not accepted at all -- the
/// counter belongs to the enrollment engine.
pub async fn update(
    State(state): State<AppState>,
    RequireInstructor(_user): RequireInstructor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBatch>,
) -> AppResult<Json<Batch>> {
    if let Some(max_seats) = input.max_seats {
        if max_seats < 1 {
            return Err(AppError::Core(CoreError::Validation(
                "Max seats must be at least 1".into(),
            )));
        }
    }

    let batch = BatchRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id: id.to_string(),
        }))?;
    Ok(Json(batch))
}

/// DELETE /api/v1/batches/{id} (admin only)
///
/// The FK cascade clears the batch's enrollment rows in the same statement.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BatchRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id: id.to_string(),
        }))
    }
}
