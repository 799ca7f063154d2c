use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel};
use serde::{Deserialize, Serialize};
use util::{config, state::AppState};
use validator::Validate;

use db::models::user::{self, Entity as UserEntity, Role};

use crate::auth::{generate_jwt, generate_reset_token, verify_reset_token};
use crate::response::{ApiError, ApiResponse, Empty};
use crate::routes::common::{EducationalStage, UserSummary, validate_request};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: Role,
    pub name: Option<String>,
    pub educational_stage: Option<EducationalStage>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserSummary,
}

/// POST /api/auth/register
///
/// Register a new user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "strongpassword",
///   "role": "student",
///   "name": "Sam Student",
///   "educational_stage": { "level": "secondary", "grade": "10" }
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ token, expires_at, user }`
/// - `400 Bad Request` on validation failure or duplicate email
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    let db = state.db();

    if user::Model::find_by_email(db, &req.email).await?.is_some() {
        return Err(ApiError::bad_request("User already exists"));
    }

    let (edu_level, edu_grade) = match req.educational_stage {
        Some(stage) => (stage.level, stage.grade),
        None => (None, None),
    };

    let created = user::Model::create(
        db,
        &req.email,
        &req.password,
        req.role,
        req.name,
        edu_level,
        edu_grade,
    )
    .await?;

    let (token, expires_at) = generate_jwt(created.id, created.role);
    let response = AuthResponse {
        token,
        expires_at,
        user: created.into(),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(response, "User registered successfully")),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
///
/// Authenticate an existing user and issue a JWT.
///
/// Login failure is always `400 { "message": "Invalid credentials" }`,
/// regardless of which of email or password was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    let db = state.db();

    let user = user::Model::find_by_email(db, &req.email)
        .await?
        .ok_or_else(|| ApiError::bad_request("Invalid credentials"))?;

    if !user.verify_password(&req.password) {
        return Err(ApiError::bad_request("Invalid credentials"));
    }

    let (token, expires_at) = generate_jwt(user.id, user.role);
    let response = AuthResponse {
        token,
        expires_at,
        user: user.into(),
    };

    Ok(Json(ApiResponse::success(response, "Login successful")))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> impl IntoResponse {
    Json(ApiResponse::success(Empty, "Logged out successfully"))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Serialize, Default)]
pub struct ForgotPasswordResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

/// POST /api/auth/forgot-password
///
/// Issues a short-lived reset token for the account. Outside production the
/// token is returned in the response body; mail delivery is out of scope.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;

    let user = user::Model::find_by_email(state.db(), &req.email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let reset_token = generate_reset_token(user.id);
    let response = ForgotPasswordResponse {
        reset_token: (config::env().to_lowercase() != "production").then_some(reset_token),
    };

    Ok(Json(ApiResponse::success(
        response,
        "Password reset instructions sent to email",
    )))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// POST /api/auth/reset-password
///
/// Verifies a reset token and replaces the account password.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;
    let db = state.db();

    let user_id = verify_reset_token(&req.token)
        .ok_or_else(|| ApiError::bad_request("Invalid or expired reset token"))?;

    let user = UserEntity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let password_hash = user::Model::hash_password(&req.new_password)
        .map_err(|e| sea_orm::DbErr::Custom(format!("Failed to hash password: {e}")))?;

    let mut active = user.into_active_model();
    active.password_hash = Set(password_hash);
    active.updated_at = Set(Utc::now());
    active.update(db).await?;

    Ok(Json(ApiResponse::success(Empty, "Password reset successful")))
}
