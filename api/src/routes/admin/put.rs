use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel, TransactionError,
    TransactionTrait,
};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use db::models::user::{self, Entity as UserEntity, Role};

use crate::response::{ApiError, ApiResponse};
use crate::routes::common::{EducationalStage, validate_request};
use crate::routes::users::common::build_profile;

/// Partial user update; absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub role: Option<Role>,
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub educational_stage: Option<EducationalStage>,
}

/// PUT /api/admin/users/{user_id}
///
/// Update another user's account, including their role. Demoting an admin is
/// checked against the remaining-admin count inside the same transaction as
/// the write; the operation is rejected if it would leave zero admins.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    let db = state.db();

    let result = db
        .transaction::<_, user::Model, ApiError>(|txn| {
            Box::pin(async move {
                let target = UserEntity::find_by_id(user_id)
                    .one(txn)
                    .await
                    .map_err(ApiError::from)?
                    .ok_or_else(|| ApiError::not_found("User not found"))?;

                if let Some(new_role) = req.role {
                    if target.role == Role::Admin && new_role != Role::Admin {
                        let admins =
                            user::Model::admin_count(txn).await.map_err(ApiError::from)?;
                        if admins <= 1 {
                            return Err(ApiError::bad_request(
                                "Cannot change role of the last admin",
                            ));
                        }
                    }
                }

                let mut active = target.into_active_model();
                if let Some(role) = req.role {
                    active.role = Set(role);
                }
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

                active.update(txn).await.map_err(ApiError::from)
            })
        })
        .await;

    let updated = match result {
        Ok(user) => user,
        Err(TransactionError::Connection(e)) => return Err(e.into()),
        Err(TransactionError::Transaction(e)) => return Err(e),
    };

    let profile = build_profile(db, updated).await?;
    Ok(Json(ApiResponse::success(
        profile,
        "User updated successfully",
    )))
}
