//! AI-assisted routes: blog generation, audio translation, and progress
//! reports. Thin data assembly around the external completion service.

pub mod common;
pub mod post;

use axum::{Router, middleware::from_fn_with_state, routing::post as post_method};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub fn ai_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/generate-blog", post_method(post::generate_blog))
        .route("/translate-audio", post_method(post::translate_audio))
        .route("/generate-report", post_method(post::generate_report))
        .route_layer(from_fn_with_state(app_state, allow_authenticated))
}
