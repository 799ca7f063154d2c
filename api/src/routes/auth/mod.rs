//! Authentication routes: registration, login, and password recovery.

pub mod post;

use axum::{Router, routing::post as post_method};
use util::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post_method(post::register))
        .route("/login", post_method(post::login))
        .route("/logout", post_method(post::logout))
        .route("/forgot-password", post_method(post::forgot_password))
        .route("/reset-password", post_method(post::reset_password))
}
