use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use db::models::meeting::Entity as MeetingEntity;

use crate::auth::{CurrentUser, guards::require_owner_or_admin};
use crate::response::{ApiError, ApiResponse, Empty};

/// DELETE /api/meetings/{meeting_id}
///
/// Cancel a meeting. Organizer or admin only.
pub async fn delete_meeting(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(meeting_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let meeting = MeetingEntity::find_by_id(meeting_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Meeting not found"))?;

    require_owner_or_admin(
        meeting.organizer_id,
        &user,
        "Not authorized to delete this meeting",
    )?;

    meeting.delete(db).await?;

    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Meeting deleted successfully",
    )))
}
