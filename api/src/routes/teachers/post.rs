use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use db::models::{
    assignment,
    course::{self, Column as CourseColumn, Entity as CourseEntity},
    quiz::{self, QuizQuestion, QuizQuestions},
    user,
    video::{self, VideoKind},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::validate_request;

/// Loads a course only if the requesting teacher owns it.
///
/// Missing and not-owned collapse into the same 404 so course ids cannot be
/// probed across teachers.
async fn owned_course(
    state: &AppState,
    teacher: &user::Model,
    course_id: i64,
) -> Result<course::Model, ApiError> {
    CourseEntity::find_by_id(course_id)
        .filter(CourseColumn::TeacherId.eq(teacher.id))
        .one(state.db())
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found or unauthorized"))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVideoRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,
    pub kind: Option<VideoKind>,

    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    pub language: Option<String>,
}

/// POST /api/teachers/me/courses/{course_id}/videos
///
/// Register a video on an owned course by URL (lecture recordings hosted
/// elsewhere, YouTube links). File uploads go through `POST /api/videos`.
pub async fn create_video(
    State(state): State<AppState>,
    Extension(CurrentUser(teacher)): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
    Json(req): Json<CreateVideoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    owned_course(&state, &teacher, course_id).await?;

    let video = video::ActiveModel {
        id: NotSet,
        course_id: Set(course_id),
        uploaded_by: Set(Some(teacher.id)),
        title: Set(req.title),
        description: Set(req.description),
        kind: Set(req.kind.unwrap_or_default()),
        url: Set(req.url),
        language: Set(req.language),
        created_at: Set(Utc::now()),
    }
    .insert(state.db())
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(video, "Video created successfully")),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "Max marks must be a positive number"))]
    pub max_marks: i32,
}

/// POST /api/teachers/me/courses/{course_id}/assignments
pub async fn create_assignment(
    State(state): State<AppState>,
    Extension(CurrentUser(teacher)): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    owned_course(&state, &teacher, course_id).await?;

    let assignment = assignment::ActiveModel {
        id: NotSet,
        course_id: Set(course_id),
        title: Set(req.title),
        description: Set(req.description),
        due_date: Set(req.due_date),
        max_marks: Set(req.max_marks),
        created_at: Set(Utc::now()),
    }
    .insert(state.db())
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            assignment,
            "Assignment created successfully",
        )),
    ))
}

#[derive(Debug, Deserialize)]
pub struct QuizQuestionBody {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub questions: Vec<QuizQuestionBody>,

    #[validate(range(min = 1, message = "Max marks must be a positive number"))]
    pub max_marks: i32,
}

/// POST /api/teachers/me/courses/{course_id}/quizzes
///
/// Create a quiz on an owned course. The question list must be non-empty;
/// correct answers stay server-side from here on.
pub async fn create_quiz(
    State(state): State<AppState>,
    Extension(CurrentUser(teacher)): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
    Json(req): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;

    if req.questions.is_empty() {
        return Err(ApiError::bad_request(
            "Quiz must contain at least one question",
        ));
    }

    owned_course(&state, &teacher, course_id).await?;

    let questions = QuizQuestions(
        req.questions
            .into_iter()
            .map(|q| QuizQuestion {
                question_text: q.question_text,
                options: q.options,
                correct_answer: q.correct_answer,
            })
            .collect(),
    );

    let quiz = quiz::ActiveModel {
        id: NotSet,
        course_id: Set(course_id),
        created_by: Set(Some(teacher.id)),
        title: Set(req.title),
        max_marks: Set(req.max_marks),
        questions: Set(questions),
        created_at: Set(Utc::now()),
    }
    .insert(state.db())
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(quiz, "Quiz created successfully")),
    ))
}
