//! Teacher-facing routes: owned courses and their content authoring.

pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get as get_method, post as post_method, put as put_method},
};
use util::state::AppState;

use crate::auth::guards::allow_teacher;

pub fn teachers_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me/courses", get_method(get::get_courses))
        .route(
            "/me/courses/{course_id}/videos",
            post_method(post::create_video),
        )
        .route(
            "/me/courses/{course_id}/assignments",
            post_method(post::create_assignment),
        )
        .route(
            "/me/courses/{course_id}/quizzes",
            post_method(post::create_quiz),
        )
        .route(
            "/me/assignments/{assignment_id}/submissions/{submission_id}",
            put_method(put::grade_submission),
        )
        .route_layer(from_fn_with_state(app_state, allow_teacher))
}
