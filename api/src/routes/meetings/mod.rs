//! Meeting routes: scheduling, listing, updating, and cancellation.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{post as post_method, put as put_method},
};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub fn meetings_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post_method(post::schedule_meeting).get(get::list_meetings),
        )
        .route(
            "/{meeting_id}",
            put_method(put::update_meeting).delete(delete::delete_meeting),
        )
        .route_layer(from_fn_with_state(app_state, allow_authenticated))
}
