//! Route-layer access guards and the shared ownership predicate.
//!
//! Every guard resolves the bearer token to a live user row (rejecting tokens
//! for deleted accounts), refreshes `last_active`, and inserts `CurrentUser`
//! into request extensions before the handler runs. Role allow-lists are
//! declared per route group in `routes::routes`.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use db::models::user::{self, Entity as UserEntity, Role};
use sea_orm::{DatabaseConnection, EntityTrait};
use util::state::AppState;

use crate::auth::claims::{AuthUser, CurrentUser};
use crate::response::ApiError;

/// Resolves the requester: decodes claims, re-loads the user row, updates
/// `last_active`, and stashes the user in request extensions.
async fn resolve_current_user(
    req: Request<Body>,
    db: &DatabaseConnection,
) -> Result<(Request<Body>, CurrentUser), ApiError> {
    let (mut parts, body) = req.into_parts();
    let AuthUser(claims) = AuthUser::from_request_parts(&mut parts, &()).await?;
    let mut req = Request::from_parts(parts, body);

    let user = UserEntity::find_by_id(claims.sub)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User no longer exists"))?;

    user::Model::touch_last_active(db, user.id).await?;

    let current = CurrentUser(user);
    req.extensions_mut().insert(current.clone());
    Ok((req, current))
}

async fn allow_role_base(
    state: AppState,
    req: Request<Body>,
    next: Next,
    allowed: &[Role],
    failure_msg: &str,
) -> Result<Response, ApiError> {
    let (req, CurrentUser(user)) = resolve_current_user(req, state.db()).await?;

    if allowed.contains(&user.role) {
        Ok(next.run(req).await)
    } else {
        Err(ApiError::forbidden(failure_msg))
    }
}

/// Basic guard to ensure the request carries a valid token for a live user.
pub async fn allow_authenticated(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (req, _user) = resolve_current_user(req, state.db()).await?;
    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    allow_role_base(state, req, next, &[Role::Admin], "Admin access required").await
}

/// Guard for teacher routes. Admins pass as well.
pub async fn allow_teacher(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    allow_role_base(
        state,
        req,
        next,
        &[Role::Teacher, Role::Admin],
        "Teacher access required",
    )
    .await
}

/// Guard for student-only routes.
pub async fn allow_student(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    allow_role_base(state, req, next, &[Role::Student], "Student access required").await
}

/// Ownership predicate: the caller must be the resource's owner.
///
/// `owner_id` is the resource's owner reference (nullable, since owner
/// accounts can be deleted out from under their resources).
pub fn require_owner(
    owner_id: Option<i64>,
    user: &user::Model,
    failure_msg: &str,
) -> Result<(), ApiError> {
    if owner_id == Some(user.id) {
        Ok(())
    } else {
        Err(ApiError::forbidden(failure_msg))
    }
}

/// Ownership predicate with an admin bypass, for resources admins may manage.
pub fn require_owner_or_admin(
    owner_id: Option<i64>,
    user: &user::Model,
    failure_msg: &str,
) -> Result<(), ApiError> {
    if user.role == Role::Admin {
        return Ok(());
    }
    require_owner(owner_id, user, failure_msg)
}
