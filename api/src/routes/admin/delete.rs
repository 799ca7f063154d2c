use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::{EntityTrait, ModelTrait, TransactionError, TransactionTrait};
use util::state::AppState;

use db::models::{
    course::Entity as CourseEntity,
    user::{self, Entity as UserEntity, Role},
    video::Entity as VideoEntity,
};

use crate::response::{ApiError, ApiResponse, Empty};

/// DELETE /api/admin/users/{user_id}
///
/// Remove any user account, subject to the last-admin invariant (checked
/// inside the same transaction as the delete). Enrollment, attendance,
/// participation, and parent-link rows are cleaned up by cascading foreign
/// keys.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .db()
        .transaction::<_, (), ApiError>(|txn| {
            Box::pin(async move {
                let target = UserEntity::find_by_id(user_id)
                    .one(txn)
                    .await
                    .map_err(ApiError::from)?
                    .ok_or_else(|| ApiError::not_found("User not found"))?;

                if target.role == Role::Admin {
                    let admins = user::Model::admin_count(txn).await.map_err(ApiError::from)?;
                    if admins <= 1 {
                        return Err(ApiError::bad_request("Cannot delete the last admin user"));
                    }
                }

                UserEntity::delete_by_id(user_id)
                    .exec(txn)
                    .await
                    .map_err(ApiError::from)?;
                Ok(())
            })
        })
        .await;

    match result {
        Ok(()) => Ok(Json(ApiResponse::<Empty>::success(
            Empty,
            "User deleted successfully",
        ))),
        Err(TransactionError::Connection(e)) => Err(e.into()),
        Err(TransactionError::Transaction(e)) => Err(e),
    }
}

/// DELETE /api/admin/courses/{course_id}
///
/// Remove any course. Deletion cascades to the course's videos, assignments
/// (and submissions), quizzes (and attempts), live streams, subject tags,
/// and enrollment rows.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let course = CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    course.delete(db).await?;

    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Course and associated content deleted successfully",
    )))
}

/// DELETE /api/admin/videos/{video_id}
pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let video = VideoEntity::find_by_id(video_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    video.delete(db).await?;

    Ok(Json(ApiResponse::<Empty>::success(
        Empty,
        "Video deleted successfully",
    )))
}
