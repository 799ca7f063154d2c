use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel};
use serde::Deserialize;
use util::state::AppState;

use db::models::{
    meeting::{Entity as MeetingEntity, MeetingKind},
    meeting_participant,
};

use crate::auth::{CurrentUser, guards::require_owner_or_admin};
use crate::response::{ApiError, ApiResponse};
use crate::routes::meetings::common::expand_meeting;

/// Partial meeting update; absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateMeetingRequest {
    pub participants: Option<Vec<i64>>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub kind: Option<MeetingKind>,
}

/// PUT /api/meetings/{meeting_id}
///
/// Update a meeting. Organizer or admin only; a rescheduled time must not be
/// in the past.
pub async fn update_meeting(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(meeting_id): Path<i64>,
    Json(req): Json<UpdateMeetingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let meeting = MeetingEntity::find_by_id(meeting_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Meeting not found"))?;

    require_owner_or_admin(
        meeting.organizer_id,
        &user,
        "Not authorized to update this meeting",
    )?;

    if let Some(scheduled_time) = req.scheduled_time {
        if scheduled_time < Utc::now() {
            return Err(ApiError::bad_request(
                "Meeting cannot be scheduled in the past",
            ));
        }
    }

    let mut active = meeting.into_active_model();
    if let Some(scheduled_time) = req.scheduled_time {
        active.scheduled_time = Set(scheduled_time);
    }
    if let Some(notes) = req.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(kind) = req.kind {
        active.kind = Set(kind);
    }
    let updated = active.update(db).await?;

    if let Some(participants) = req.participants {
        meeting_participant::Model::add_all(db, meeting_id, &participants).await?;
    }

    let response = expand_meeting(db, updated).await?;
    Ok(Json(ApiResponse::success(
        response,
        "Meeting updated successfully",
    )))
}
