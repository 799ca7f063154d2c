use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use db::models::video::Entity as VideoEntity;

use crate::auth::{CurrentUser, guards::require_owner_or_admin};
use crate::response::{ApiError, ApiResponse, Empty};

/// DELETE /api/videos/{video_id}
///
/// Remove a video. Allowed for the uploader and for admins.
pub async fn delete_video(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(video_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let video = VideoEntity::find_by_id(video_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    require_owner_or_admin(video.uploaded_by, &user, "Not authorized to delete this video")?;

    video.delete(db).await?;

    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Video deleted successfully",
    )))
}
