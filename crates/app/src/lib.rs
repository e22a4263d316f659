//! HTTP surface for the storybook.
//!
//! Every route resolves the visitor's session from the `storybook_session`
//! cookie, runs one `StoryService` operation and answers with JSON or a
//! redirect.

#![forbid(unsafe_code)]

use axum::Router;
use axum::routing::{get, post};
use services::StoryService;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod visit;

pub use error::AppError;
pub use visit::SESSION_COOKIE;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub story: StoryService,
}

impl AppState {
    #[must_use]
    pub fn new(story: StoryService) -> Self {
        Self { story }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/map", get(handlers::map))
        .route("/module/:name", get(handlers::module))
        .route("/module/:name/complete", post(handlers::complete_module))
        .route("/finale", get(handlers::finale))
        .route("/reset", get(handlers::reset).post(handlers::reset))
        .route("/letter", get(handlers::letter).post(handlers::submit_letter))
        .route("/letter/reply", get(handlers::reply))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
