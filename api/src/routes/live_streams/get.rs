use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use util::state::AppState;

use db::models::{
    course_student,
    live_stream::{Column as StreamColumn, Entity as StreamEntity},
    live_stream_attendance::{Column as AttendanceColumn, Entity as AttendanceEntity},
    user::{Column as UserColumn, Entity as UserEntity, Role},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse, Paginated};
use crate::routes::common::{PageQuery, UserSummary, paginate};
use crate::routes::live_streams::common::{StreamListItem, expand_streams};

/// GET /api/live-streams
///
/// Paginated list of streams that have not ended. Students see only streams
/// from courses they are enrolled in.
pub async fn list_streams(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = params.resolve();

    let mut query = StreamEntity::find()
        .filter(StreamColumn::EndTime.is_null())
        .order_by_desc(StreamColumn::StartTime);

    if user.role == Role::Student {
        let enrolled_ids = course_student::Model::course_ids_for(db, user.id).await?;
        query = query.filter(StreamColumn::CourseId.is_in(enrolled_ids));
    }

    let (streams, total) = paginate(db, query, page, limit).await?;
    let items = expand_streams(db, streams).await?;

    Ok(Json(ApiResponse::success(
        Paginated::new(items, page, limit, total),
        "Live streams retrieved successfully",
    )))
}

#[derive(Debug, Serialize)]
pub struct StreamDetailResponse {
    #[serde(flatten)]
    pub stream: StreamListItem,
    pub attendance: Vec<UserSummary>,
}

/// GET /api/live-streams/{stream_id}
///
/// One stream with conductor, course title, and attendance expanded.
/// Students must be enrolled in the stream's course.
pub async fn get_stream(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(stream_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let stream = StreamEntity::find_by_id(stream_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Live stream not found"))?;

    if user.role == Role::Student
        && !course_student::Model::is_enrolled(db, stream.course_id, user.id).await?
    {
        return Err(ApiError::forbidden("Not enrolled in this course"));
    }

    let attendee_ids: Vec<i64> = AttendanceEntity::find()
        .filter(AttendanceColumn::StreamId.eq(stream_id))
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.user_id)
        .collect();

    let attendance: Vec<UserSummary> = UserEntity::find()
        .filter(UserColumn::Id.is_in(attendee_ids))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let mut expanded = expand_streams(db, vec![stream]).await?;

    Ok(Json(ApiResponse::success(
        StreamDetailResponse {
            stream: expanded.remove(0),
            attendance,
        },
        "Live stream retrieved successfully",
    )))
}
