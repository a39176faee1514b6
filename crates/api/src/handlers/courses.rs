//! Handlers for the `/courses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use edupulse_core::error::CoreError;
use edupulse_core::types::DbId;
use edupulse_db::models::course::{Course, CreateCourse, UpdateCourse};
use edupulse_db::repositories::CourseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireInstructor};
use crate::state::AppState;

/// POST /api/v1/courses (instructor/admin)
pub async fn create(
    State(state): State<AppState>,
    RequireInstructor(user): RequireInstructor,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Course title must not be empty".into(),
        )));
    }
    let course = CourseRepo::create(&state.pool, &input).await?;
    tracing::info!(course_id = course.id, created_by = user.user_id, "course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/v1/courses (public)
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepo::list(&state.pool).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/{id} (public)
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Course>> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: id.to_string(),
        }))?;
    Ok(Json(course))
}

/// PATCH /api/v1/courses/{id} (instructor/admin)
pub async fn update(
    State(state): State<AppState>,
    RequireInstructor(_user): RequireInstructor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<Course>> {
    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: id.to_string(),
        }))?;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/{id} (admin only)
///
/// Cascades to the course's batches and their enrollments.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: id.to_string(),
        }))
    }
}
