//! Map view of one hub's logistics plan
//!
//! Produces a serializable description of markers and route lines, and a
//! Leaflet fragment that draws it in the browser. Popups are fixed at render
//! time.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{DisposalSite, RemovalSite, RouteDetail};

/// Downtown Montreal
pub const MAP_CENTER: [f64; 2] = [45.5017, -73.5673];
pub const MAP_ZOOM: u8 = 11;
pub const MAP_WIDTH_PX: u32 = 900;
pub const MAP_HEIGHT_PX: u32 = 700;

/// m³ per unit of marker radius and line weight
pub const VOLUME_SCALE: f64 = 200_000.0;
pub const MIN_MARKER_SIZE: f64 = 3.0;
pub const MAX_MARKER_SIZE: f64 = 8.0;
/// Radius of a site that received nothing from the hub
pub const EMPTY_MARKER_SIZE: f64 = 1.0;

const HUB_COLOR: &str = "green";
const PICKUP_COLOR: &str = "blue";
const DISPOSAL_COLOR: &str = "red";
const ROUTE_COLOR: &str = "blue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Star icon
    Hub,
    /// Circle
    Pickup,
    /// Triangle
    Disposal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: [f64; 2],
    pub radius: f64,
    pub color: &'static str,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLine {
    pub points: [[f64; 2]; 2],
    pub weight: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub markers: Vec<Marker>,
    pub lines: Vec<RouteLine>,
}

/// Marker radius for a transported volume.
pub fn marker_size(volume: f64) -> f64 {
    if volume > 0.0 {
        (volume / VOLUME_SCALE).clamp(MIN_MARKER_SIZE, MAX_MARKER_SIZE)
    } else {
        EMPTY_MARKER_SIZE
    }
}

/// Route line weight, not clamped.
pub fn line_weight(volume: f64) -> f64 {
    volume / VOLUME_SCALE
}

pub fn render_map(
    hub: &str,
    routes: &[RouteDetail],
    disposal_sites: &[DisposalSite],
    removal_sites: &[RemovalSite],
) -> Result<MapView> {
    let hub_site = removal_sites
        .iter()
        .find(|s| s.name == hub)
        .ok_or_else(|| DashboardError::HubNotInRemovalSites(hub.to_string()))?;

    let hub_routes: Vec<&RouteDetail> = routes.iter().filter(|r| r.hub == hub).collect();

    let mut picked_up: HashMap<&str, f64> = HashMap::new();
    let mut disposed: HashMap<&str, f64> = HashMap::new();
    for route in &hub_routes {
        *picked_up.entry(route.removal_site.as_str()).or_insert(0.0) += route.snow_transported;
        *disposed.entry(route.disposal_site.as_str()).or_insert(0.0) += route.snow_transported;
    }

    let mut markers = Vec::with_capacity(1 + removal_sites.len() + disposal_sites.len());

    markers.push(Marker {
        kind: MarkerKind::Hub,
        position: [hub_site.latitude, hub_site.longitude],
        radius: MAX_MARKER_SIZE,
        color: HUB_COLOR,
        popup: format!("Optimal Hub: {}", escape_html(hub)),
    });

    for site in removal_sites.iter().filter(|s| s.name != hub) {
        let volume = picked_up.get(site.name.as_str()).copied().unwrap_or(0.0);
        markers.push(Marker {
            kind: MarkerKind::Pickup,
            position: [site.latitude, site.longitude],
            radius: marker_size(volume),
            color: PICKUP_COLOR,
            popup: format!(
                "Pickup: {}<br>Priority: {}<br>Snow Transported: {} m³",
                escape_html(&site.name),
                escape_html(&site.priority),
                format_number(volume)
            ),
        });
    }

    for site in disposal_sites {
        let volume = disposed.get(site.name.as_str()).copied().unwrap_or(0.0);
        markers.push(Marker {
            kind: MarkerKind::Disposal,
            position: [site.latitude, site.longitude],
            radius: marker_size(volume),
            color: DISPOSAL_COLOR,
            popup: format!(
                "Disposal: {}<br>Cost: {} $/m³<br>Snow Disposed: {} m³",
                escape_html(&site.name),
                format_number(site.cost_per_m3),
                format_number(volume)
            ),
        });
    }

    let lines: Vec<RouteLine> = hub_routes
        .iter()
        .map(|r| RouteLine {
            points: [[r.start_lat, r.start_lng], [r.end_lat, r.end_lng]],
            weight: line_weight(r.snow_transported),
            color: ROUTE_COLOR,
        })
        .collect();

    debug!("Hub {}: {} markers, {} route lines", hub, markers.len(), lines.len());

    Ok(MapView {
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        width: MAP_WIDTH_PX,
        height: MAP_HEIGHT_PX,
        markers,
        lines,
    })
}

const LEAFLET_TEMPLATE: &str = r#"<div id="__ID__" style="width: __W__px; height: __H__px;"></div>
<script>
(function () {
  const view = __VIEW__;
  const map = L.map("__ID__").setView(view.center, view.zoom);
  L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
    attribution: "&copy; OpenStreetMap contributors"
  }).addTo(map);
  for (const m of view.markers) {
    let layer;
    if (m.kind === "hub") {
      layer = L.marker(m.position, {
        icon: L.divIcon({
          className: "hub-icon",
          html: '<span style="color:' + m.color + ';font-size:28px;">&#9733;</span>',
          iconSize: [28, 28],
          iconAnchor: [14, 14]
        })
      });
    } else if (m.kind === "disposal") {
      const s = Math.max(2 * m.radius, 2);
      layer = L.marker(m.position, {
        icon: L.divIcon({
          className: "disposal-icon",
          html: '<svg width="' + s + '" height="' + s + '"><polygon points="' + (s / 2) + ',0 ' + s + ',' + s + ' 0,' + s + '" fill="' + m.color + '" stroke="' + m.color + '"/></svg>',
          iconSize: [s, s],
          iconAnchor: [s / 2, s / 2]
        })
      });
    } else {
      layer = L.circleMarker(m.position, {
        radius: m.radius, color: m.color, fill: true, fillColor: m.color
      });
    }
    layer.bindPopup(m.popup).addTo(map);
  }
  for (const l of view.lines) {
    L.polyline(l.points, { color: l.color, weight: l.weight }).addTo(map);
  }
})();
</script>"#;

impl MapView {
    /// Leaflet container and script. The page must already include Leaflet.
    pub fn to_html(&self, element_id: &str) -> String {
        let view = serde_json::to_string(self)
            .unwrap_or_else(|_| "null".to_string())
            .replace("</", "<\\/");

        LEAFLET_TEMPLATE
            .replace("__ID__", &escape_html(element_id))
            .replace("__W__", &self.width.to_string())
            .replace("__H__", &self.height.to_string())
            .replace("__VIEW__", &view)
    }
}

/// Whole numbers print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
