use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use db::models::{
    course::{Column as CourseColumn, Entity as CourseEntity},
    course_student,
    live_stream::{self, Entity as StreamEntity},
    live_stream_attendance,
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::validate_request;

#[derive(Debug, Deserialize, Validate)]
pub struct StartStreamRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,
    pub course_id: i64,
}

/// POST /api/live-streams
///
/// Start a live stream on an owned course. The conductor is recorded as the
/// first attendee.
pub async fn start_stream(
    State(state): State<AppState>,
    Extension(CurrentUser(teacher)): Extension<CurrentUser>,
    Json(req): Json<StartStreamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    let db = state.db();

    CourseEntity::find_by_id(req.course_id)
        .filter(CourseColumn::TeacherId.eq(teacher.id))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found or unauthorized"))?;

    let stream = live_stream::ActiveModel {
        id: NotSet,
        course_id: Set(req.course_id),
        conducted_by: Set(Some(teacher.id)),
        title: Set(req.title),
        description: Set(req.description),
        start_time: Set(Utc::now()),
        end_time: Set(None),
        recording_url: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    live_stream_attendance::Model::join(db, stream.id, teacher.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(stream, "Live stream started successfully")),
    ))
}

/// POST /api/live-streams/{stream_id}/join
///
/// Join a running stream. Enrolled students and the conductor may join;
/// attendance is an add-if-absent write, so rejoining is harmless.
pub async fn join_stream(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(stream_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let stream = StreamEntity::find_by_id(stream_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Live stream not found"))?;

    if stream.has_ended() {
        return Err(ApiError::bad_request("This live stream has ended"));
    }

    let enrolled = course_student::Model::is_enrolled(db, stream.course_id, user.id).await?;
    if !enrolled && !stream.is_conducted_by(user.id) {
        return Err(ApiError::forbidden("Not authorized to join this stream"));
    }

    live_stream_attendance::Model::join(db, stream_id, user.id).await?;

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "stream_id": stream_id }),
        "Joined live stream successfully",
    )))
}

#[derive(Debug, Deserialize, Default)]
pub struct EndStreamRequest {
    pub recording_url: Option<String>,
}

/// POST /api/live-streams/{stream_id}/end
///
/// End a stream. Only the conductor may end it, and only once; a second call
/// fails with `400 { "message": "Stream has already ended" }`.
pub async fn end_stream(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(stream_id): Path<i64>,
    body: Option<Json<EndStreamRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let Json(req) = body.unwrap_or_default();

    let stream = StreamEntity::find_by_id(stream_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Live stream not found"))?;

    if !stream.is_conducted_by(user.id) {
        return Err(ApiError::forbidden("Not authorized to end this stream"));
    }

    if stream.has_ended() {
        return Err(ApiError::bad_request("Stream has already ended"));
    }

    let mut active = stream.into_active_model();
    active.end_time = Set(Some(Utc::now()));
    active.recording_url = Set(req.recording_url);
    let ended = active.update(db).await?;

    Ok(Json(ApiResponse::success(
        ended,
        "Live stream ended successfully",
    )))
}
