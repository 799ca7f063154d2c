use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel};
use util::state::AppState;

use db::models::{course::Entity as CourseEntity, course_subject};

use crate::auth::{CurrentUser, guards::require_owner};
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::validate_request;
use crate::routes::courses::common::{CourseResponse, CourseUpdateRequest};

/// PUT /api/courses/{course_id}
///
/// Partial update of a course. Only the owning teacher may mutate it; a
/// non-owner gets `403 { "message": "Unauthorized to update this course" }`.
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
    Json(req): Json<CourseUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    let db = state.db();

    let course = CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    require_owner(course.teacher_id, &user, "Unauthorized to update this course")?;

    let mut active = course.into_active_model();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }
    if let Some(stage) = req.educational_stage {
        active.edu_level = Set(stage.level);
        active.edu_grade = Set(stage.grade);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(db).await?;

    let subjects = match req.subjects {
        Some(subjects) => {
            course_subject::Model::replace_for_course(db, course_id, &subjects).await?;
            subjects
        }
        None => course_subject::Model::for_course(db, course_id).await?,
    };

    Ok(Json(ApiResponse::success(
        CourseResponse::from_parts(updated, subjects),
        "Course updated successfully",
    )))
}
