//! Hub selection → derived views
//!
//! `build_view` is a pure function of the loaded tables and the selection.
//! Whoever hosts the page calls it again whenever the selection changes.

use serde::Serialize;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::map::{escape_html, format_number, render_map, MapView};
use crate::models::Dataset;
use crate::utilization::{calculate_utilization, UtilizationRow};

pub const PAGE_TITLE: &str = "Snow Removal Optimization";
const MAP_ELEMENT_ID: &str = "hub-map";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub selected_hub: String,
}

impl DashboardState {
    pub fn new(selected_hub: impl Into<String>) -> Self {
        Self {
            selected_hub: selected_hub.into(),
        }
    }

    /// First hub of the results table, as the selector shows it.
    pub fn default_for(dataset: &Dataset) -> Option<Self> {
        dataset.hub_results.first().map(|r| Self::new(r.hub.clone()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub hub: String,
    pub hubs: Vec<String>,
    pub total_cost: f64,
    pub cost_line: String,
    pub utilization: Vec<UtilizationRow>,
    pub map: MapView,
}

/// `Total Cost for A: $5.00 M`
pub fn format_total_cost(hub: &str, total_cost: f64) -> String {
    format!("Total Cost for {}: ${:.2} M", hub, total_cost / 1e6)
}

pub fn build_view(dataset: &Dataset, state: &DashboardState) -> Result<DashboardView> {
    let hub = state.selected_hub.as_str();
    debug!("Building view for hub {}", hub);

    let total_cost = dataset
        .total_cost(hub)
        .ok_or_else(|| DashboardError::UnknownHub(hub.to_string()))?;

    let utilization = calculate_utilization(hub, &dataset.route_details, &dataset.disposal_sites)?;
    let map = render_map(
        hub,
        &dataset.route_details,
        &dataset.disposal_sites,
        &dataset.removal_sites,
    )?;

    Ok(DashboardView {
        hub: hub.to_string(),
        hubs: dataset.hubs(),
        total_cost,
        cost_line: format_total_cost(hub, total_cost),
        utilization,
        map,
    })
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
  body { font-family: sans-serif; margin: 2rem; }
  table { border-collapse: collapse; margin-bottom: 1.5rem; }
  th, td { border: 1px solid #ccc; padding: 0.3rem 0.7rem; text-align: right; }
  th:first-child, td:first-child { text-align: left; }
  .hub-icon, .disposal-icon { background: none; border: none; }
</style>
</head>
<body>
"#;

/// Full dashboard page for a computed view.
pub fn render_page(view: &DashboardView) -> String {
    let mut html = PAGE_HEAD.replace("__TITLE__", PAGE_TITLE);

    html.push_str(&format!("<h1>{}</h1>\n", PAGE_TITLE));

    html.push_str("<form method=\"get\" action=\"/\">\n<label for=\"hub\">Select a Hub</label>\n");
    html.push_str("<select id=\"hub\" name=\"hub\" onchange=\"this.form.submit()\">\n");
    for hub in &view.hubs {
        let selected = if *hub == view.hub { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            escape_html(hub),
            selected
        ));
    }
    html.push_str("</select>\n<noscript><button type=\"submit\">Show</button></noscript>\n</form>\n");

    html.push_str(&format!("<p>{}</p>\n", escape_html(&view.cost_line)));

    html.push_str("<p>Utilization of Disposal Sites:</p>\n<table>\n<thead><tr>");
    for column in [
        "NomDepot",
        "Capacity (M m³)",
        "Total Snow Disposed (m³)",
        "Utilization (%)",
    ] {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &view.utilization {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.name),
            row.capacity,
            format_number(row.total_snow_disposed),
            row.utilization
        ));
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str(&view.map.to_html(MAP_ELEMENT_ID));
    html.push_str("\n</body>\n</html>\n");
    html
}

/// Page shown when a view cannot be built.
pub fn render_error_page(message: &str) -> String {
    let mut html = PAGE_HEAD.replace("__TITLE__", PAGE_TITLE);
    html.push_str(&format!(
        "<h1>{}</h1>\n<p>Unable to render the dashboard: {}</p>\n<p><a href=\"/\">Back</a></p>\n</body>\n</html>\n",
        PAGE_TITLE,
        escape_html(message)
    ));
    html
}
