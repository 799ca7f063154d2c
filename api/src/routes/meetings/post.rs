use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
};
use serde::Deserialize;
use util::state::AppState;

use db::models::{
    meeting::{self, MeetingKind},
    meeting_participant,
    user::{Column as UserColumn, Entity as UserEntity},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::meetings::common::expand_meeting;

#[derive(Debug, Deserialize)]
pub struct ScheduleMeetingRequest {
    #[serde(default)]
    pub participants: Vec<i64>,
    pub scheduled_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub kind: Option<MeetingKind>,
}

/// POST /api/meetings
///
/// Schedule a meeting. The time must not be in the past, every listed
/// participant must exist, and the organizer is always included in the
/// participant set.
pub async fn schedule_meeting(
    State(state): State<AppState>,
    Extension(CurrentUser(organizer)): Extension<CurrentUser>,
    Json(req): Json<ScheduleMeetingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    if req.scheduled_time < Utc::now() {
        return Err(ApiError::bad_request(
            "Meeting cannot be scheduled in the past",
        ));
    }

    if !req.participants.is_empty() {
        let found = UserEntity::find()
            .filter(UserColumn::Id.is_in(req.participants.clone()))
            .count(db)
            .await?;
        if found as usize != req.participants.len() {
            return Err(ApiError::bad_request("One or more participants not found"));
        }
    }

    let meeting = meeting::ActiveModel {
        id: NotSet,
        organizer_id: Set(Some(organizer.id)),
        scheduled_time: Set(req.scheduled_time),
        notes: Set(req.notes),
        kind: Set(req.kind.unwrap_or_default()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    let mut participants = req.participants;
    participants.push(organizer.id);
    meeting_participant::Model::add_all(db, meeting.id, &participants).await?;

    let response = expand_meeting(db, meeting).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            response,
            "Meeting scheduled successfully",
        )),
    ))
}
