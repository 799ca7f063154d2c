use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter};
use serde::Deserialize;
use util::state::AppState;

use db::models::{
    assignment::Entity as AssignmentEntity,
    assignment_submission::{Column as SubmissionColumn, Entity as SubmissionEntity},
    course::{Column as CourseColumn, Entity as CourseEntity},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub struct GradeSubmissionRequest {
    pub grade: f64,
    pub feedback: Option<String>,
}

/// PUT /api/teachers/me/assignments/{assignment_id}/submissions/{submission_id}
///
/// Grade one submission, addressed by id within the assignment. The
/// assignment must belong to a course owned by the requesting teacher;
/// missing and not-owned collapse into the same 404.
pub async fn grade_submission(
    State(state): State<AppState>,
    Extension(CurrentUser(teacher)): Extension<CurrentUser>,
    Path((assignment_id, submission_id)): Path<(i64, i64)>,
    Json(req): Json<GradeSubmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let assignment = AssignmentEntity::find_by_id(assignment_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment not found or unauthorized"))?;

    CourseEntity::find_by_id(assignment.course_id)
        .filter(CourseColumn::TeacherId.eq(teacher.id))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment not found or unauthorized"))?;

    let submission = SubmissionEntity::find_by_id(submission_id)
        .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Submission not found"))?;

    let mut active = submission.into_active_model();
    active.grade = Set(Some(req.grade));
    active.feedback = Set(req.feedback);
    let graded = active.update(db).await?;

    Ok(Json(ApiResponse::success(
        graded,
        "Submission graded successfully",
    )))
}
