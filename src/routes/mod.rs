//! HTTP route handlers and router configuration
//!
//! Admin routes carry no authentication.

mod admin;
mod public;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the main application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        // Public reads
        .route("/test", get(public::test))
        .route("/content", get(public::content))
        .route("/services", get(public::services))
        .route("/portfolio", get(public::portfolio))
        .route("/videos", get(public::videos))
        .route("/photos", get(public::photos))
        // Admin writes
        .route("/admin/content", post(admin::update_content))
        .route("/admin/services", post(admin::add_service))
        .route("/admin/portfolio", post(admin::add_portfolio))
        .route("/admin/video", post(admin::add_video))
        .route("/admin/photo", post(admin::add_photo))
        // Visitor writes
        .route("/contact", post(public::contact))
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    if state.cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}
