//! Live stream routes: start, discover, join, and end.

pub mod common;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get as get_method, post as post_method},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_teacher};

pub fn live_streams_routes(app_state: AppState) -> Router<AppState> {
    let teacher_routes = Router::new()
        .route("/", post_method(post::start_stream))
        .route_layer(from_fn_with_state(app_state.clone(), allow_teacher));

    let open_routes = Router::new()
        .route("/", get_method(get::list_streams))
        .route("/{stream_id}", get_method(get::get_stream))
        .route("/{stream_id}/join", post_method(post::join_stream))
        .route("/{stream_id}/end", post_method(post::end_stream))
        .route_layer(from_fn_with_state(app_state, allow_authenticated));

    open_routes.merge(teacher_routes)
}
