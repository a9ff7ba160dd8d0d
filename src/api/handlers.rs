//! HTTP handlers for the dashboard page and the JSON API
//!
//! These handlers use the shared DashboardService.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::service::{DashboardService, HubSummary, LoadSummary};
use crate::dashboard::{render_error_page, render_page, DashboardView};
use crate::error::DashboardError;
use crate::map::MapView;
use crate::utilization::UtilizationRow;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct HubQuery {
    pub hub: Option<String>,
}

pub type AppState = Arc<DashboardService>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        DashboardError::ZeroCapacity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(error: DashboardError) -> (StatusCode, Json<ErrorResponse>) {
    let status = status_for(&error);
    if status.is_server_error() {
        warn!("Request failed: {}", error);
    }
    (status, Json(ErrorResponse { error: error.to_string() }))
}

/// GET /?hub=X
pub async fn dashboard_page(
    State(service): State<AppState>,
    Query(params): Query<HubQuery>,
) -> impl IntoResponse {
    let hub = params.hub.as_deref().filter(|h| !h.is_empty());
    match service.view(hub).await {
        Ok(view) => (StatusCode::OK, Html(render_page(&view))),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                warn!("Dashboard render failed: {}", e);
            }
            (status, Html(render_error_page(&e.to_string())))
        }
    }
}

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/hubs
pub async fn get_hubs(State(service): State<AppState>) -> ApiResult<Vec<HubSummary>> {
    service.hubs().await.map(Json).map_err(api_error)
}

/// GET /api/v1/hubs/:hub/utilization
pub async fn get_utilization(
    State(service): State<AppState>,
    Path(hub): Path<String>,
) -> ApiResult<Vec<UtilizationRow>> {
    service.utilization(&hub).await.map(Json).map_err(api_error)
}

/// GET /api/v1/hubs/:hub/map
pub async fn get_map(
    State(service): State<AppState>,
    Path(hub): Path<String>,
) -> ApiResult<MapView> {
    service.map(&hub).await.map(Json).map_err(api_error)
}

/// GET /api/v1/hubs/:hub/view
pub async fn get_view(
    State(service): State<AppState>,
    Path(hub): Path<String>,
) -> ApiResult<DashboardView> {
    service.view(Some(&hub)).await.map(Json).map_err(api_error)
}

/// POST /api/v1/reload
pub async fn reload(State(service): State<AppState>) -> ApiResult<LoadSummary> {
    service.reload().await.map(Json).map_err(api_error)
}
