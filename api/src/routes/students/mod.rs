//! Student-facing routes: enrolled courses, progress, streaks, assignment
//! submissions, video tracking, and quiz attempts.

pub mod get;
pub mod post;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get as get_method, post as post_method},
};
use util::state::AppState;

use crate::auth::guards::allow_student;
use crate::upload::MAX_UPLOAD_BYTES;

pub fn students_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me/courses", get_method(get::get_enrolled_courses))
        .route("/me/progress", get_method(get::get_progress))
        .route("/me/streak", get_method(get::get_streak))
        .route("/me/recommended", get_method(get::get_recommended_courses))
        .route(
            "/courses/{course_id}/assignments",
            get_method(get::get_course_assignments),
        )
        .route(
            "/assignments/{assignment_id}/submissions",
            post_method(post::submit_assignment).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/assignments/{assignment_id}/submission",
            get_method(get::get_submission),
        )
        .route("/videos/{video_id}/track", post_method(post::track_video))
        .route(
            "/quizzes/{quiz_id}/attempts",
            post_method(post::submit_quiz).get(get::get_quiz_attempts),
        )
        .route_layer(from_fn_with_state(app_state, allow_student))
}
