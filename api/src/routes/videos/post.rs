use axum::{
    Extension, Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, EntityTrait};
use util::state::AppState;

use db::models::{
    course::Entity as CourseEntity,
    video::{self, VideoKind},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::videos::common::parse_kind;
use crate::upload::{UploadKind, parse_upload};

/// POST /api/videos
///
/// Multipart video upload (field `video`, video MIME types only, 100MB cap)
/// accompanied by `title`, `course_id`, and optional `description`, `kind`,
/// and `language` text fields. The upload stage runs to completion before
/// any database write.
pub async fn upload_video(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let form = parse_upload(multipart, UploadKind::Video).await?;
    let stored = form.require_file(UploadKind::Video)?;

    let title = form
        .text("title")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Title is required"))?
        .to_string();

    let course_id: i64 = form
        .text("course_id")
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| ApiError::bad_request("Missing or invalid course_id"))?;

    let kind = match form.text("kind") {
        Some(raw) => {
            parse_kind(raw).ok_or_else(|| ApiError::bad_request("Invalid video kind"))?
        }
        None => VideoKind::Lecture,
    };

    CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let video = video::ActiveModel {
        id: NotSet,
        course_id: Set(course_id),
        uploaded_by: Set(Some(user.id)),
        title: Set(title),
        description: Set(form.text("description").map(str::to_string)),
        kind: Set(kind),
        url: Set(stored.url.clone()),
        language: Set(form.text("language").map(str::to_string)),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(video, "Video uploaded successfully")),
    ))
}
