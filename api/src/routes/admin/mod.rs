//! Admin routes: cross-tenant user, course, and video management.
//!
//! The whole group is admin-gated at the router layer.

pub mod delete;
pub mod get;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete as delete_method, get as get_method, put as put_method},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;

pub fn admin_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get_method(get::list_users))
        .route(
            "/users/{user_id}",
            put_method(put::update_user).delete(delete::delete_user),
        )
        .route("/courses", get_method(get::list_courses))
        .route("/courses/{course_id}", delete_method(delete::delete_course))
        .route("/videos", get_method(get::list_videos))
        .route("/videos/{video_id}", delete_method(delete::delete_video))
        .route_layer(from_fn_with_state(app_state, allow_admin))
}
