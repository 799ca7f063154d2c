use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use db::models::user;

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::{EducationalStage, validate_request};
use crate::routes::users::common::build_profile;

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub educational_stage: Option<EducationalStage>,
}

/// PUT /api/users/me
///
/// Update the requester's own profile. Only name, email, and educational
/// stage may change through this endpoint.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    let db = state.db();

    if let Some(ref email) = req.email {
        if *email != user.email && user::Model::find_by_email(db, email).await?.is_some() {
            return Err(ApiError::bad_request("A user with this email already exists"));
        }
    }

    let mut active = user.into_active_model();
    if let Some(name) = req.name {
        active.name = Set(Some(name));
    }
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    if let Some(stage) = req.educational_stage {
        active.edu_level = Set(stage.level);
        active.edu_grade = Set(stage.grade);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(db).await?;
    let profile = build_profile(db, updated).await?;

    Ok(Json(ApiResponse::success(
        profile,
        "Profile updated successfully",
    )))
}
