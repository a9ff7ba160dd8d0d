//! Shared dashboard logic behind the HTML page and the JSON API
//!
//! The four tables are loaded once and kept in memory. Each request runs the
//! pure pipeline against the cached tables.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::dashboard::{build_view, format_total_cost, DashboardState, DashboardView};
use crate::error::{DashboardError, Result};
use crate::loader::{load_dataset, DataPaths, TextEncoding};
use crate::map::{render_map, MapView};
use crate::models::Dataset;
use crate::utilization::{calculate_utilization, UtilizationRow};

#[derive(Debug, Clone, Serialize)]
pub struct HubSummary {
    pub hub: String,
    pub total_cost: f64,
    pub cost_line: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub encoding: TextEncoding,
    pub hub_results: usize,
    pub route_details: usize,
    pub disposal_sites: usize,
    pub removal_sites: usize,
}

impl From<&Dataset> for LoadSummary {
    fn from(d: &Dataset) -> Self {
        Self {
            encoding: d.encoding,
            hub_results: d.hub_results.len(),
            route_details: d.route_details.len(),
            disposal_sites: d.disposal_sites.len(),
            removal_sites: d.removal_sites.len(),
        }
    }
}

pub struct DashboardService {
    paths: DataPaths,
    cached_dataset: Arc<RwLock<Option<Arc<Dataset>>>>,
}

impl DashboardService {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            cached_dataset: Arc::new(RwLock::new(None)),
        }
    }

    /// Service over tables that are already in memory.
    pub fn with_dataset(paths: DataPaths, dataset: Dataset) -> Self {
        Self {
            paths,
            cached_dataset: Arc::new(RwLock::new(Some(Arc::new(dataset)))),
        }
    }

    pub async fn dataset(&self) -> Result<Arc<Dataset>> {
        // Check cache first
        {
            let cache = self.cached_dataset.read().await;
            if let Some(dataset) = cache.as_ref() {
                return Ok(dataset.clone());
            }
        }

        let mut cache = self.cached_dataset.write().await;
        if let Some(dataset) = cache.as_ref() {
            return Ok(dataset.clone());
        }
        let dataset = self.load().await?;
        *cache = Some(dataset.clone());
        Ok(dataset)
    }

    /// Read the CSVs again and replace the cached tables.
    pub async fn reload(&self) -> Result<LoadSummary> {
        let dataset = self.load().await?;
        let summary = LoadSummary::from(dataset.as_ref());
        *self.cached_dataset.write().await = Some(dataset);
        info!("Reloaded tables from {}", self.paths.hub_results.display());
        Ok(summary)
    }

    async fn load(&self) -> Result<Arc<Dataset>> {
        let paths = self.paths.clone();
        let dataset = tokio::task::spawn_blocking(move || load_dataset(&paths)).await??;
        Ok(Arc::new(dataset))
    }

    pub async fn hubs(&self) -> Result<Vec<HubSummary>> {
        let dataset = self.dataset().await?;
        Ok(dataset
            .hubs()
            .into_iter()
            .filter_map(|hub| {
                dataset.total_cost(&hub).map(|total_cost| HubSummary {
                    cost_line: format_total_cost(&hub, total_cost),
                    hub,
                    total_cost,
                })
            })
            .collect())
    }

    /// Full view for `hub`, or for the first hub when none is selected.
    pub async fn view(&self, hub: Option<&str>) -> Result<DashboardView> {
        let dataset = self.dataset().await?;
        let state = match hub {
            Some(hub) => DashboardState::new(hub),
            None => DashboardState::default_for(&dataset).ok_or(DashboardError::NoHubs)?,
        };
        build_view(&dataset, &state)
    }

    pub async fn utilization(&self, hub: &str) -> Result<Vec<UtilizationRow>> {
        let dataset = self.known_hub(hub).await?;
        calculate_utilization(hub, &dataset.route_details, &dataset.disposal_sites)
    }

    pub async fn map(&self, hub: &str) -> Result<MapView> {
        let dataset = self.known_hub(hub).await?;
        render_map(
            hub,
            &dataset.route_details,
            &dataset.disposal_sites,
            &dataset.removal_sites,
        )
    }

    async fn known_hub(&self, hub: &str) -> Result<Arc<Dataset>> {
        let dataset = self.dataset().await?;
        if dataset.total_cost(hub).is_none() {
            return Err(DashboardError::UnknownHub(hub.to_string()));
        }
        Ok(dataset)
    }
}
