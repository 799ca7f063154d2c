//! Video routes: uploads, catalogue, and deletion.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get as get_method, post as post_method},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_teacher};
use crate::upload::MAX_UPLOAD_BYTES;

pub fn videos_routes(app_state: AppState) -> Router<AppState> {
    let teacher_routes = Router::new()
        .route(
            "/",
            post_method(post::upload_video).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route_layer(from_fn_with_state(app_state.clone(), allow_teacher));

    let open_routes = Router::new()
        .route("/", get_method(get::list_videos))
        .route(
            "/{video_id}",
            get_method(get::get_video).delete(delete::delete_video),
        )
        .route_layer(from_fn_with_state(app_state, allow_authenticated));

    open_routes.merge(teacher_routes)
}
