use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use util::state::AppState;

use db::models::{
    meeting::{Column as MeetingColumn, Entity as MeetingEntity, MeetingKind},
    meeting_participant::{Column as ParticipantColumn, Entity as ParticipantEntity},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse, Paginated};
use crate::routes::common::{paginate, resolve_page};
use crate::routes::meetings::common::expand_meeting;

#[derive(Debug, Deserialize)]
pub struct MeetingListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub kind: Option<MeetingKind>,
    pub start_date: Option<DateTime<Utc>>,
}

/// GET /api/meetings
///
/// The requester's meetings, soonest first, filterable by kind and earliest
/// scheduled time.
pub async fn list_meetings(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<MeetingListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = resolve_page(params.page, params.limit);

    let meeting_ids: Vec<i64> = ParticipantEntity::find()
        .filter(ParticipantColumn::UserId.eq(user.id))
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.meeting_id)
        .collect();

    let mut query = MeetingEntity::find()
        .filter(MeetingColumn::Id.is_in(meeting_ids))
        .order_by_asc(MeetingColumn::ScheduledTime);

    if let Some(kind) = params.kind {
        query = query.filter(MeetingColumn::Kind.eq(kind));
    }
    if let Some(start) = params.start_date {
        query = query.filter(MeetingColumn::ScheduledTime.gte(start));
    }

    let (meetings, total) = paginate(db, query, page, limit).await?;

    let mut items = Vec::with_capacity(meetings.len());
    for meeting in meetings {
        items.push(expand_meeting(db, meeting).await?);
    }

    Ok(Json(ApiResponse::success(
        Paginated::new(items, page, limit, total),
        "Meetings retrieved successfully",
    )))
}
