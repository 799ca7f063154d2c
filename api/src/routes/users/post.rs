use axum::{Extension, Json, extract::Multipart, extract::State, response::IntoResponse};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
use serde::Serialize;
use util::state::AppState;

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::upload::{UploadKind, parse_upload};

#[derive(Debug, Serialize)]
pub struct ProfilePictureResponse {
    pub file_url: String,
}

/// POST /api/users/me/profile-picture
///
/// Multipart upload of a new profile picture (field `profile_picture`,
/// image MIME types only).
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = parse_upload(multipart, UploadKind::ProfilePicture).await?;
    let stored = form.require_file(UploadKind::ProfilePicture)?;
    let file_url = stored.url.clone();

    let mut active = user.into_active_model();
    active.profile_picture_path = Set(Some(file_url.clone()));
    active.updated_at = Set(Utc::now());
    active.update(state.db()).await?;

    Ok(Json(ApiResponse::success(
        ProfilePictureResponse { file_url },
        "Profile picture uploaded successfully",
    )))
}
