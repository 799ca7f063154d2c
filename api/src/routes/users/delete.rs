use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::{EntityTrait, TransactionTrait, TransactionError};
use util::state::AppState;

use db::models::user::{self, Entity as UserEntity, Role};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse, Empty};

/// DELETE /api/users/{user_id}
///
/// Remove a user account. Admins only. Membership rows (enrollments,
/// attendance, meeting participation, parent links) are cleaned up by the
/// schema's cascading foreign keys.
///
/// The last-admin invariant is enforced inside the same transaction as the
/// delete: the operation is rejected if it would leave zero admins.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(CurrentUser(requester)): Extension<CurrentUser>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if requester.role != Role::Admin {
        return Err(ApiError::forbidden("Permission denied"));
    }

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
