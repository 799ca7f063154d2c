//! Course routes: CRUD, enrollment, rosters, and course video lookups.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get as get_method, post as post_method, put as put_method},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_student, allow_teacher};

pub fn courses_routes(app_state: AppState) -> Router<AppState> {
    let teacher_routes = Router::new()
        .route("/", post_method(post::create))
        .route(
            "/{course_id}",
            put_method(put::update).delete(delete::delete_course),
        )
        .route_layer(from_fn_with_state(app_state.clone(), allow_teacher));

    let student_routes = Router::new()
        .route(
            "/{course_id}/enroll",
            post_method(post::enroll).delete(delete::unenroll),
        )
        .route_layer(from_fn_with_state(app_state.clone(), allow_student));

    let open_routes = Router::new()
        .route("/", get_method(get::list_courses))
        .route("/{course_id}", get_method(get::get_course))
        .route("/{course_id}/students", get_method(get::get_students))
        .route("/{course_id}/videos", get_method(get::get_course_videos))
        .route(
            "/{course_id}/videos/{video_id}",
            get_method(get::get_course_video),
        )
        .route_layer(from_fn_with_state(app_state, allow_authenticated));

    open_routes.merge(teacher_routes).merge(student_routes)
}
