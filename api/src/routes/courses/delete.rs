use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use db::models::{course::Entity as CourseEntity, course_student};

use crate::auth::{CurrentUser, guards::require_owner};
use crate::response::{ApiError, ApiResponse, Empty};

/// DELETE /api/courses/{course_id}
///
/// Delete a course. Only the owning teacher may do this. Deletion cascades
/// through the schema to the course's videos, assignments (and submissions),
/// quizzes (and attempts), live streams, subject tags, and enrollment rows,
/// so no user retains a reference to the course afterwards.
pub async fn delete_course(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let course = CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    require_owner(course.teacher_id, &user, "Unauthorized to delete this course")?;

    course.delete(db).await?;

    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Course deleted successfully",
    )))
}

/// DELETE /api/courses/{course_id}/enroll
///
/// Remove the requesting student from the course roster.
pub async fn unenroll(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    course_student::Model::unenroll(db, course_id, user.id).await?;

    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Unenrolled successfully",
    )))
}
