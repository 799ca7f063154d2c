//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the appropriate access
//! control middleware:
//! - `/health` → liveness probe (public)
//! - `/auth` → registration, login, password recovery (public)
//! - `/users` → own profile and user lookups (authenticated)
//! - `/courses` → catalogue, CRUD, enrollment (role-gated per group)
//! - `/videos` → uploads and catalogue (role-gated per group)
//! - `/students` → enrolled courses, progress, submissions, attempts
//! - `/teachers` → owned courses, content authoring, grading
//! - `/admin` → cross-tenant management (admin only)
//! - `/live-streams` → start, join, end
//! - `/meetings` → scheduling
//! - `/ai` → AI-assisted generation

use axum::{Router, middleware::from_fn_with_state};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod admin;
pub mod ai;
pub mod auth;
pub mod common;
pub mod courses;
pub mod health;
pub mod live_streams;
pub mod meetings;
pub mod students;
pub mod teachers;
pub mod users;
pub mod videos;

/// Builds the complete application router for all HTTP endpoints.
///
/// Groups that need finer-grained role gates (teacher-only creation next to
/// authenticated reads) build their own layered sub-routers; the rest are
/// gated here.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest(
            "/users",
            users::users_routes()
                .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .nest("/courses", courses::courses_routes(app_state.clone()))
        .nest("/videos", videos::videos_routes(app_state.clone()))
        .nest("/students", students::students_routes(app_state.clone()))
        .nest("/teachers", teachers::teachers_routes(app_state.clone()))
        .nest("/admin", admin::admin_routes(app_state.clone()))
        .nest(
            "/live-streams",
            live_streams::live_streams_routes(app_state.clone()),
        )
        .nest("/meetings", meetings::meetings_routes(app_state.clone()))
        .nest("/ai", ai::ai_routes(app_state.clone()))
        .with_state(app_state)
}
