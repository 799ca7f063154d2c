use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, EntityTrait};
use util::state::AppState;

use db::models::{
    course::{self, Entity as CourseEntity},
    course_student, course_subject,
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::validate_request;
use crate::routes::courses::common::{CourseRequest, CourseResponse};

/// POST /api/courses
///
/// Create a new course owned by the requesting teacher.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Algebra I",
///   "description": "Linear equations and factoring",
///   "educational_stage": { "level": "secondary", "grade": "10" },
///   "subjects": ["math"]
/// }
/// ```
///
/// A missing `educational_stage` leaves the course unclassified.
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    let db = state.db();

    let (edu_level, edu_grade) = match req.educational_stage {
        Some(stage) => (stage.level, stage.grade),
        None => (None, None),
    };

    let now = Utc::now();
    let course = course::ActiveModel {
        id: NotSet,
        teacher_id: Set(Some(user.id)),
        title: Set(req.title),
        description: Set(req.description),
        edu_level: Set(edu_level),
        edu_grade: Set(edu_grade),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    let subjects = req.subjects.unwrap_or_default();
    course_subject::Model::replace_for_course(db, course.id, &subjects).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            CourseResponse::from_parts(course, subjects),
            "Course created successfully",
        )),
    ))
}

/// POST /api/courses/{course_id}/enroll
///
/// Enroll the requesting student. Enrollment is an add-if-absent write on the
/// membership table; a duplicate attempt fails with 400.
pub async fn enroll(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let inserted = course_student::Model::enroll(db, course_id, user.id).await?;
    if !inserted {
        return Err(ApiError::bad_request("Student already enrolled"));
    }

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "course_id": course_id, "student_id": user.id }),
        "Enrolled successfully",
    )))
}
