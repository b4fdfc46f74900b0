//! Axum router — maps all URL paths to handlers.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    analysis::{analysis_page, analysis_select},
    api,
    dashboard::dashboard,
    upload::{upload_page, upload_submit},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",              get(dashboard))
        .route("/upload",        get(upload_page))
        .route("/upload/run",    post(upload_submit))
        .route("/analysis",      get(analysis_page))
        .route("/analysis/{id}", get(analysis_select))

        // API endpoints
        .route("/api/analyze",   post(api::analyze))

        // The relay must not cap upload size below what the analysis
        // service accepts
        .layer(DefaultBodyLimit::disable())

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
