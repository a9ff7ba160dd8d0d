//! Snow removal dashboard server
//!
//! Usage:
//!   ./target/release/snow_dashboard [--port 8501] [--data-dir DIR]
//!
//! Page:
//!   GET  /?hub=X                      - Dashboard for hub X (first hub by default)
//!
//! REST endpoints:
//!   GET  /api/v1/health               - Health check
//!   GET  /api/v1/hubs                 - Hubs with total cost
//!   GET  /api/v1/hubs/:hub/utilization - Disposal-site utilization
//!   GET  /api/v1/hubs/:hub/map        - Markers and route lines
//!   GET  /api/v1/hubs/:hub/view       - Everything above for one hub
//!   POST /api/v1/reload               - Re-read the CSV files

use anyhow::Result;
use clap::Parser;
use snow_removal_dashboard::api::{create_router, DashboardService};
use snow_removal_dashboard::config::ServerArgs;
use snow_removal_dashboard::logging::init_tracing;
use std::sync::Arc;
use tracing::info;

fn print_banner(args: &ServerArgs) {
    println!("============================================================");
    println!("         SNOW REMOVAL OPTIMIZATION DASHBOARD");
    println!("============================================================");
    println!();
    println!("  Dashboard: http://localhost:{}/", args.port);
    println!("  REST:      http://localhost:{}/api/v1/", args.port);
    println!("  Data dir:  {}", args.data.data_dir.display());
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = ServerArgs::parse();
    print_banner(&args);

    let service = Arc::new(DashboardService::new(args.data.paths()));

    // Fail at startup rather than on the first request.
    let summary = service.reload().await?;
    info!(
        "Serving {} hubs, {} routes ({})",
        summary.hub_results, summary.route_details, summary.encoding
    );

    let app = create_router(service);
    let addr = args.addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
