use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use util::state::AppState;

use db::models::video::{Column as VideoColumn, Entity as VideoEntity, VideoKind};

use crate::response::{ApiError, ApiResponse, Paginated};
use crate::routes::common::{paginate, resolve_page};
use crate::routes::videos::common::expand_videos;

#[derive(Debug, Deserialize)]
pub struct VideoListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub kind: Option<VideoKind>,
    pub language: Option<String>,
    pub course_id: Option<i64>,
}

/// GET /api/videos
///
/// Paginated video catalogue, newest first, filterable by kind, language,
/// and course.
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<VideoListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = resolve_page(params.page, params.limit);

    let mut query = VideoEntity::find().order_by_desc(VideoColumn::CreatedAt);

    if let Some(kind) = params.kind {
        query = query.filter(VideoColumn::Kind.eq(kind));
    }
    if let Some(ref language) = params.language {
        query = query.filter(VideoColumn::Language.eq(language));
    }
    if let Some(course_id) = params.course_id {
        query = query.filter(VideoColumn::CourseId.eq(course_id));
    }

    let (videos, total) = paginate(db, query, page, limit).await?;
    let items = expand_videos(db, videos).await?;

    Ok(Json(ApiResponse::success(
        Paginated::new(items, page, limit, total),
        "Videos retrieved successfully",
    )))
}

/// GET /api/videos/{video_id}
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let video = VideoEntity::find_by_id(video_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    let mut expanded = expand_videos(db, vec![video]).await?;
    let item = expanded.remove(0);

    Ok(Json(ApiResponse::success(
        item,
        "Video retrieved successfully",
    )))
}
