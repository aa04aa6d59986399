//! HTTP API module
//!
//! The command and status surface the presentation layer talks to.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/work/start", post(start_work_handler))
        .route("/break/start", post(start_break_handler))
        .route("/break/postpone", post(postpone_handler))
        .route("/break/skip", post(skip_break_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/stop", post(stop_handler))
        .route("/settings", get(get_settings_handler).put(put_settings_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
