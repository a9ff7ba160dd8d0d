use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::loader::TextEncoding;

/// Row of `Optimal_Hub_Results.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubResult {
    #[serde(rename = "Hub")]
    pub hub: String,
    #[serde(rename = "TotalCost")]
    pub total_cost: f64,
}

/// Row of `Route_Details.csv`: one flow from a pickup site to a disposal site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetail {
    #[serde(rename = "Hub")]
    pub hub: String,
    #[serde(rename = "RemovalSite")]
    pub removal_site: String,
    #[serde(rename = "DisposalSite")]
    pub disposal_site: String,
    #[serde(rename = "SnowTransported")]
    pub snow_transported: f64,
    #[serde(rename = "Start_Lat")]
    pub start_lat: f64,
    #[serde(rename = "Start_Lng")]
    pub start_lng: f64,
    #[serde(rename = "End_Lat")]
    pub end_lat: f64,
    #[serde(rename = "End_Lng")]
    pub end_lng: f64,
}

/// Row of `Disposal_Sites.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisposalSite {
    #[serde(rename = "NomDepot")]
    pub name: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    /// Raw capacity in m³
    #[serde(rename = "Capacite m3")]
    pub capacity_m3: f64,
    #[serde(rename = "Cost ($/m3)")]
    pub cost_per_m3: f64,
}

/// Row of `Removal_Sites.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalSite {
    #[serde(rename = "NomSecteur")]
    pub name: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Priority")]
    pub priority: String,
}

/// The four tables, loaded together with a single encoding.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub hub_results: Vec<HubResult>,
    pub route_details: Vec<RouteDetail>,
    pub disposal_sites: Vec<DisposalSite>,
    pub removal_sites: Vec<RemovalSite>,
    pub encoding: TextEncoding,
}

impl Dataset {
    /// Selectable hubs in file order, first occurrence wins.
    pub fn hubs(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.hub_results
            .iter()
            .filter(|r| seen.insert(r.hub.as_str()))
            .map(|r| r.hub.clone())
            .collect()
    }

    /// Total cost of the first row for `hub`.
    pub fn total_cost(&self, hub: &str) -> Option<f64> {
        self.hub_results
            .iter()
            .find(|r| r.hub == hub)
            .map(|r| r.total_cost)
    }

    /// Cross-table reference problems. Empty when the files are consistent.
    pub fn integrity_report(&self) -> Vec<String> {
        let hubs: HashSet<&str> = self.hub_results.iter().map(|r| r.hub.as_str()).collect();
        let depots: HashSet<&str> = self.disposal_sites.iter().map(|d| d.name.as_str()).collect();
        let sectors: HashSet<&str> = self.removal_sites.iter().map(|s| s.name.as_str()).collect();

        let mut findings = Vec::new();
        let mut reported = HashSet::new();

        for route in &self.route_details {
            if !hubs.contains(route.hub.as_str()) && reported.insert(("hub", route.hub.as_str())) {
                findings.push(format!("route hub '{}' has no hub result", route.hub));
            }
            if !depots.contains(route.disposal_site.as_str())
                && reported.insert(("depot", route.disposal_site.as_str()))
            {
                findings.push(format!(
                    "route disposal site '{}' is not a known disposal site",
                    route.disposal_site
                ));
            }
        }

        for hub in &self.hub_results {
            if !sectors.contains(hub.hub.as_str()) && reported.insert(("sector", hub.hub.as_str())) {
                findings.push(format!("hub '{}' is not a removal site", hub.hub));
            }
        }

        findings
    }
}
