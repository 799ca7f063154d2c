//! User profile routes: own profile, profile pictures, and admin lookups.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get as get_method, post as post_method},
};
use util::state::AppState;

use crate::upload::MAX_UPLOAD_BYTES;

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get_method(get::get_profile).put(put::update_profile),
        )
        .route(
            "/me/profile-picture",
            post_method(post::upload_profile_picture)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/{user_id}",
            get_method(get::get_user).delete(delete::delete_user),
        )
}
