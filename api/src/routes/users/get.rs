use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use db::models::user::{Entity as UserEntity, Role};
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::users::common::build_profile;

/// GET /api/users/me
///
/// The requester's own profile with enrolled courses, teaching courses, and
/// children expanded.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = build_profile(state.db(), user).await?;
    Ok(Json(ApiResponse::success(
        profile,
        "Profile retrieved successfully",
    )))
}

/// GET /api/users/{user_id}
///
/// Look up another user's profile. Admins and teachers only.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(CurrentUser(requester)): Extension<CurrentUser>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !matches!(requester.role, Role::Admin | Role::Teacher) {
        return Err(ApiError::forbidden("Permission denied"));
    }

    let user = UserEntity::find_by_id(user_id)
        .one(state.db())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let profile = build_profile(state.db(), user).await?;
    Ok(Json(ApiResponse::success(
        profile,
        "User retrieved successfully",
    )))
}
