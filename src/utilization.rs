//! Disposal-site utilization for one hub
//!
//! Volumes are summed per disposal site over the hub's routes and joined onto
//! the disposal-site table. Sites the hub never sends snow to do not appear.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{DisposalSite, RouteDetail};

/// Capacities at or above this many million m³ are never a binding constraint.
pub const UNLIMITED_CAPACITY_MILLIONS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Capacity {
    /// Millions of m³
    Bounded(f64),
    Unlimited,
}

impl Serialize for Capacity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Capacity::Bounded(millions) => serializer.serialize_f64(*millions),
            Capacity::Unlimited => serializer.serialize_str("Unlimited"),
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Bounded(millions) => write!(f, "{:?}", millions),
            Capacity::Unlimited => f.write_str("Unlimited"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Utilization {
    Percent(f64),
    NotApplicable,
}

impl Serialize for Utilization {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Utilization::Percent(pct) => serializer.serialize_f64(*pct),
            Utilization::NotApplicable => serializer.serialize_str("-"),
        }
    }
}

impl fmt::Display for Utilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utilization::Percent(pct) => write!(f, "{:?}", pct),
            Utilization::NotApplicable => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationRow {
    #[serde(rename = "NomDepot")]
    pub name: String,
    #[serde(rename = "Capacity (M m³)")]
    pub capacity: Capacity,
    #[serde(rename = "Total Snow Disposed (m³)")]
    pub total_snow_disposed: f64,
    #[serde(rename = "Utilization (%)")]
    pub utilization: Utilization,
}

/// Utilization table for `hub`, ordered by disposal-site name.
pub fn calculate_utilization(
    hub: &str,
    routes: &[RouteDetail],
    disposal_sites: &[DisposalSite],
) -> Result<Vec<UtilizationRow>> {
    let mut disposed: BTreeMap<&str, f64> = BTreeMap::new();
    for route in routes.iter().filter(|r| r.hub == hub) {
        *disposed.entry(route.disposal_site.as_str()).or_insert(0.0) += route.snow_transported;
    }

    let rows = disposed
        .iter()
        .flat_map(|(&site, &total)| {
            disposal_sites
                .iter()
                .filter(move |d| d.name == site)
                .map(move |d| utilization_row(d, total))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Hub {}: {} disposal sites used, {} matched",
        hub,
        disposed.len(),
        rows.len()
    );

    Ok(rows)
}

fn utilization_row(site: &DisposalSite, total_snow_disposed: f64) -> Result<UtilizationRow> {
    let millions = site.capacity_m3 / 1e6;

    let (capacity, utilization) = if millions >= UNLIMITED_CAPACITY_MILLIONS {
        (Capacity::Unlimited, Utilization::NotApplicable)
    } else if site.capacity_m3 <= 0.0 {
        return Err(DashboardError::ZeroCapacity {
            site: site.name.clone(),
        });
    } else {
        let pct = total_snow_disposed / site.capacity_m3 * 100.0;
        (
            Capacity::Bounded(millions),
            Utilization::Percent(round_to_cents(pct)),
        )
    };

    Ok(UtilizationRow {
        name: site.name.clone(),
        capacity,
        total_snow_disposed,
        utilization,
    })
}

/// Two decimals, ties to even on the exact binary value.
fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(hub: &str, disposal: &str, volume: f64) -> RouteDetail {
        RouteDetail {
            hub: hub.into(),
            removal_site: "S1".into(),
            disposal_site: disposal.into(),
            snow_transported: volume,
            start_lat: 45.5,
            start_lng: -73.6,
            end_lat: 45.6,
            end_lng: -73.5,
        }
    }

    fn site(name: &str, capacity_m3: f64) -> DisposalSite {
        DisposalSite {
            name: name.into(),
            latitude: 45.6,
            longitude: -73.5,
            capacity_m3,
            cost_per_m3: 1.5,
        }
    }

    #[test]
    fn test_bounded_site_utilization() {
        let routes = vec![route("A", "D1", 100_000.0), route("A", "D1", 200_000.0)];
        let sites = vec![site("D1", 5_000_000.0)];

        let rows = calculate_utilization("A", &routes, &sites).unwrap();
        assert_eq!(
            rows,
            vec![UtilizationRow {
                name: "D1".into(),
                capacity: Capacity::Bounded(5.0),
                total_snow_disposed: 300_000.0,
                utilization: Utilization::Percent(6.0),
            }]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let routes = vec![route("A", "BIG", 1.0), route("A", "EDGE", 1.0)];
        let sites = vec![site("BIG", 25_000_000.0), site("EDGE", 10_000_000.0)];

        let rows = calculate_utilization("A", &routes, &sites).unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.capacity, Capacity::Unlimited);
            assert_eq!(row.utilization, Utilization::NotApplicable);
        }
    }

    #[test]
    fn test_inner_join_drops_unused_and_unknown_sites() {
        let routes = vec![
            route("A", "D2", 50.0),
            route("A", "GHOST", 10.0),
            route("B", "D1", 70.0),
        ];
        let sites = vec![site("D1", 1_000.0), site("D2", 1_000.0)];

        let rows = calculate_utilization("A", &routes, &sites).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["D2"]);
    }

    #[test]
    fn test_rows_sorted_by_site_name() {
        let routes = vec![route("A", "Zeta", 1.0), route("A", "Alpha", 1.0)];
        let sites = vec![site("Zeta", 1_000.0), site("Alpha", 1_000.0)];

        let rows = calculate_utilization("A", &routes, &sites).unwrap();
        assert_eq!(rows[0].name, "Alpha");
        assert_eq!(rows[1].name, "Zeta");
    }

    #[test]
    fn test_percentage_rounded_to_two_decimals() {
        let routes = vec![route("A", "D1", 1.0)];
        let sites = vec![site("D1", 3.0)];

        let rows = calculate_utilization("A", &routes, &sites).unwrap();
        assert_eq!(rows[0].utilization, Utilization::Percent(33.33));
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        let routes = vec![route("A", "D1", 1.0), route("A", "D3", 3.0)];
        let sites = vec![site("D1", 800.0), site("D3", 800.0)];

        let rows = calculate_utilization("A", &routes, &sites).unwrap();
        assert_eq!(rows[0].utilization, Utilization::Percent(0.12));
        assert_eq!(rows[1].utilization, Utilization::Percent(0.38));
    }

    #[test]
    fn test_display_keeps_decimal_point() {
        assert_eq!(Capacity::Bounded(5.0).to_string(), "5.0");
        assert_eq!(Capacity::Bounded(0.005).to_string(), "0.005");
        assert_eq!(Capacity::Unlimited.to_string(), "Unlimited");
        assert_eq!(Utilization::Percent(6.0).to_string(), "6.0");
        assert_eq!(Utilization::NotApplicable.to_string(), "-");
    }

    #[test]
    fn test_zero_capacity_is_an_error() {
        let routes = vec![route("A", "D0", 5.0)];
        let sites = vec![site("D0", 0.0)];

        let err = calculate_utilization("A", &routes, &sites).unwrap_err();
        assert!(matches!(err, DashboardError::ZeroCapacity { site } if site == "D0"));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let routes = vec![route("A", "D1", 12_345.0), route("A", "D2", 1.0)];
        let sites = vec![site("D1", 2_000_000.0), site("D2", 40_000_000.0)];

        let first = calculate_utilization("A", &routes, &sites).unwrap();
        let second = calculate_utilization("A", &routes, &sites).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_presentation_columns() {
        let rows = vec![
            UtilizationRow {
                name: "D1".into(),
                capacity: Capacity::Bounded(5.0),
                total_snow_disposed: 300_000.0,
                utilization: Utilization::Percent(6.0),
            },
            UtilizationRow {
                name: "D2".into(),
                capacity: Capacity::Unlimited,
                total_snow_disposed: 1.0,
                utilization: Utilization::NotApplicable,
            },
        ];

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["Capacity (M m³)"], serde_json::json!(5.0));
        assert_eq!(json[0]["Utilization (%)"], serde_json::json!(6.0));
        assert_eq!(json[1]["Capacity (M m³)"], "Unlimited");
        assert_eq!(json[1]["Utilization (%)"], "-");
        assert_eq!(json[1]["Total Snow Disposed (m³)"], serde_json::json!(1.0));
    }
}
