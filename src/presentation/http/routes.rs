//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::presentation::websocket::ws_comments_handler;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // WebSocket endpoint for live comment subscriptions
        .route("/ws/posts/{post_id}/comments", get(ws_comments_handler))
        // Health check endpoint
        .route("/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(handlers::post::create_post))
        .route("/posts", get(handlers::post::get_posts))
        .route("/posts/{post_id}", get(handlers::post::get_post))
        .route(
            "/posts/{post_id}/comments-allowed",
            patch(handlers::post::set_comments_allowed),
        )
        .route(
            "/posts/{post_id}/comments",
            post(handlers::comment::create_comment),
        )
        .route(
            "/posts/{post_id}/comments",
            get(handlers::comment::get_comments),
        )
}
