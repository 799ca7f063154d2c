use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, EntityTrait};
use serde::{Deserialize, Serialize};
use util::state::AppState;

use db::models::{
    assignment::Entity as AssignmentEntity,
    assignment_submission::{
        self, Column as SubmissionColumn, Entity as SubmissionEntity, SubmissionFiles,
    },
    course_student,
    quiz::Entity as QuizEntity,
    quiz_attempt::{self, AttemptAnswers},
    user,
    video::Entity as VideoEntity,
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::upload::{UploadKind, parse_upload};

/// POST /api/students/assignments/{assignment_id}/submissions
///
/// Multipart submission upload (field `submission`; pdf/doc/docx/txt/zip).
///
/// Business rules, in order: the student must be enrolled in the assignment's
/// course, may submit at most once, and may not submit after the due date.
/// The insert is add-if-absent on (assignment, student), so a concurrent
/// duplicate collapses into the same 400.
pub async fn submit_assignment(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Path(assignment_id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let assignment = AssignmentEntity::find_by_id(assignment_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment not found"))?;

    if !course_student::Model::is_enrolled(db, assignment.course_id, student.id).await? {
        return Err(ApiError::forbidden("You are not enrolled in this course"));
    }

    if assignment_submission::Model::find_for_student(db, assignment_id, student.id)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request(
            "You have already submitted this assignment",
        ));
    }

    if assignment.past_due(Utc::now()) {
        return Err(ApiError::bad_request(
            "Assignment submission deadline has passed",
        ));
    }

    let form = parse_upload(multipart, UploadKind::Submission).await?;
    let stored = form.require_file(UploadKind::Submission)?;

    let inserted = SubmissionEntity::insert(assignment_submission::ActiveModel {
        id: NotSet,
        assignment_id: Set(assignment_id),
        student_id: Set(student.id),
        files: Set(SubmissionFiles(vec![stored.url.clone()])),
        grade: Set(None),
        feedback: Set(None),
        submitted_at: Set(Utc::now()),
    })
    .on_conflict(
        OnConflict::columns([SubmissionColumn::AssignmentId, SubmissionColumn::StudentId])
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    if inserted == 0 {
        return Err(ApiError::bad_request(
            "You have already submitted this assignment",
        ));
    }

    user::Model::bump_activity(db, student.id).await?;

    let submission =
        assignment_submission::Model::find_for_student(db, assignment_id, student.id)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound("submission".into()))?;

    Ok(Json(ApiResponse::success(
        submission,
        "Assignment submitted successfully",
    )))
}

#[derive(Debug, Deserialize)]
pub struct TrackProgressRequest {
    pub progress: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TrackProgressResponse {
    pub progress: Option<f64>,
}

/// POST /api/students/videos/{video_id}/track
///
/// Record watching activity against a video. Enrollment required; bumps the
/// activity streak.
pub async fn track_video(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Path(video_id): Path<i64>,
    Json(req): Json<TrackProgressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let video = VideoEntity::find_by_id(video_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    if !course_student::Model::is_enrolled(db, video.course_id, student.id).await? {
        return Err(ApiError::forbidden("You are not enrolled in this course"));
    }

    user::Model::bump_activity(db, student.id).await?;

    Ok(Json(ApiResponse::success(
        TrackProgressResponse {
            progress: req.progress,
        },
        "Progress tracked successfully",
    )))
}

#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitQuizResponse {
    pub score: f64,
    pub total_questions: usize,
    pub correct_answers: usize,
}

/// POST /api/students/quizzes/{quiz_id}/attempts
///
/// Submit an answer sheet. Answers are compared positionally against the
/// question list; the score `(correct / total) × 100` is computed here, once,
/// and stored on the attempt. Enrollment required; bumps the activity streak.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Path(quiz_id): Path<i64>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let quiz = QuizEntity::find_by_id(quiz_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Quiz not found"))?;

    if !course_student::Model::is_enrolled(db, quiz.course_id, student.id).await? {
        return Err(ApiError::forbidden("You are not enrolled in this course"));
    }

    let (correct, score) = quiz.questions.score(&req.answers);

    quiz_attempt::ActiveModel {
        id: NotSet,
        quiz_id: Set(quiz_id),
        student_id: Set(student.id),
        answers: Set(AttemptAnswers(req.answers)),
        score: Set(score),
        attempted_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    user::Model::bump_activity(db, student.id).await?;

    Ok(Json(ApiResponse::success(
        SubmitQuizResponse {
            score,
            total_questions: quiz.questions.len(),
            correct_answers: correct,
        },
        "Quiz submitted successfully",
    )))
}
