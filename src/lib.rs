//! Snow removal plan dashboard
//!
//! Reads the output tables of an upstream hub/route optimization and renders,
//! for one selected hub, its total cost, disposal-site utilization and a map
//! of flows.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod logging;
pub mod map;
pub mod models;
pub mod utilization;

pub use dashboard::{build_view, DashboardState, DashboardView};
pub use error::{DashboardError, Result};
pub use loader::{load_dataset, DataPaths, TextEncoding};
pub use models::Dataset;
