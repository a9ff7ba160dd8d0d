//! HTTP surface of the dashboard
//!
//! Serves the HTML page and a JSON API over the same derived views.

pub mod handlers;
pub mod service;

pub use service::DashboardService;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(service: Arc<DashboardService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page
        .route("/", get(handlers::dashboard_page))
        // Health check
        .route("/api/v1/health", get(handlers::health))
        // Hubs
        .route("/api/v1/hubs", get(handlers::get_hubs))
        .route("/api/v1/hubs/:hub/utilization", get(handlers::get_utilization))
        .route("/api/v1/hubs/:hub/map", get(handlers::get_map))
        .route("/api/v1/hubs/:hub/view", get(handlers::get_view))
        // Data
        .route("/api/v1/reload", post(handlers::reload))
        // State and middleware
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
