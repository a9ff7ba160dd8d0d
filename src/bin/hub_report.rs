//! Print one hub's cost and disposal-site utilization
//!
//! Usage:
//!   cargo run --release --bin hub_report -- [--hub NAME] [--data-dir DIR] [--json]

use anyhow::{Context, Result};
use clap::Parser;
use snow_removal_dashboard::config::DataArgs;
use snow_removal_dashboard::logging::init_tracing;
use snow_removal_dashboard::map::{format_number, MarkerKind};
use snow_removal_dashboard::{build_view, load_dataset, DashboardState};

#[derive(Parser, Debug)]
#[command(name = "hub_report")]
#[command(about = "Print the cost and disposal-site utilization of one hub")]
struct Args {
    /// Hub to report on (defaults to the first hub in the results file)
    #[arg(long)]
    hub: Option<String>,

    /// Emit the full view as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    data: DataArgs,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let dataset = load_dataset(&args.data.paths())?;
    let state = match args.hub {
        Some(hub) => DashboardState::new(hub),
        None => DashboardState::default_for(&dataset).context("hub results file has no rows")?,
    };
    let view = build_view(&dataset, &state)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}", view.cost_line);
    println!();
    println!("Utilization of Disposal Sites:");
    println!(
        "{:<30} {:>16} {:>26} {:>16}",
        "NomDepot", "Capacity (M m³)", "Total Snow Disposed (m³)", "Utilization (%)"
    );
    println!("{}", "─".repeat(91));
    for row in &view.utilization {
        println!(
            "{:<30} {:>16} {:>26} {:>16}",
            row.name,
            row.capacity.to_string(),
            format_number(row.total_snow_disposed),
            row.utilization.to_string()
        );
    }
    println!();

    let pickups = view.map.markers.iter().filter(|m| m.kind == MarkerKind::Pickup).count();
    let disposals = view.map.markers.iter().filter(|m| m.kind == MarkerKind::Disposal).count();
    println!(
        "Map: {} pickup sites, {} disposal sites, {} routes",
        pickups,
        disposals,
        view.map.lines.len()
    );

    Ok(())
}
