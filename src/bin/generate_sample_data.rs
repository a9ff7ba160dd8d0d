//! Sample plan generator
//!
//! Writes a consistent set of the four dashboard CSVs around Montreal: every
//! hub is a removal site, every route points at a known disposal site, and
//! each hub's total cost is the sum of its disposal costs plus a fixed part.
//!
//! Usage:
//!   cargo run --release --bin generate_sample_data -- [OPTIONS]
//!
//! Options:
//!   --output-dir <PATH>      Where to write the CSVs (default: data)
//!   --removal-sites <N>      Pickup sectors (default: 12)
//!   --disposal-sites <N>     Disposal depots (default: 5)
//!   --hubs <N>               Candidate hubs (default: 3)
//!   --seed <N>               Random seed for reproducibility (optional)
//!   --latin1                 Encode the files as ISO-8859-1 instead of UTF-8

use anyhow::{ensure, Context, Result};
use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;
use snow_removal_dashboard::loader::{
    DISPOSAL_SITES_FILE, HUB_RESULTS_FILE, REMOVAL_SITES_FILE, ROUTE_DETAILS_FILE,
};
use snow_removal_dashboard::map::MAP_CENTER;
use snow_removal_dashboard::models::{DisposalSite, HubResult, RemovalSite, RouteDetail};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "generate_sample_data")]
#[command(about = "Generate a sample snow removal plan for the dashboard")]
struct Args {
    /// Output directory
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,

    /// Number of removal (pickup) sites
    #[arg(long, default_value = "12")]
    removal_sites: usize,

    /// Number of disposal sites
    #[arg(long, default_value = "5")]
    disposal_sites: usize,

    /// Number of candidate hubs, taken from the removal sites
    #[arg(long, default_value = "3")]
    hubs: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Write ISO-8859-1 instead of UTF-8
    #[arg(long)]
    latin1: bool,
}

const SECTOR_NAMES: &[&str] = &[
    "Ahuntsic", "Anjou", "Côte-des-Neiges", "Lachine", "LaSalle", "Le Plateau",
    "Le Sud-Ouest", "Mercier", "Montréal-Nord", "Outremont", "Pierrefonds",
    "Rosemont", "Saint-Laurent", "Saint-Léonard", "Verdun", "Ville-Marie",
    "Villeray", "Hochelaga", "Parc-Extension", "Rivière-des-Prairies",
];

const DEPOT_NAMES: &[&str] = &[
    "Carrière Saint-Michel", "Dépôt Angrignon", "Dépôt Bellerive", "Dépôt Butler",
    "Dépôt Newman", "Chute Iberville", "Dépôt Langelier", "Dépôt Sainte-Anne",
];

const FIXED_HUB_COST: f64 = 750_000.0;

fn site_name(names: &[&str], i: usize) -> String {
    match names.get(i) {
        Some(name) => name.to_string(),
        None => format!("{} {}", names[i % names.len()], i / names.len() + 1),
    }
}

/// A point within roughly 15 km of the map center
fn jitter_location(rng: &mut impl Rng) -> (f64, f64) {
    let lat = MAP_CENTER[0] + rng.gen_range(-0.12..=0.12);
    let lng = MAP_CENTER[1] + rng.gen_range(-0.18..=0.18);
    ((lat * 1e4).round() / 1e4, (lng * 1e4).round() / 1e4)
}

fn generate_removal_sites(count: usize, rng: &mut impl Rng) -> Vec<RemovalSite> {
    (0..count)
        .map(|i| {
            let (latitude, longitude) = jitter_location(rng);
            RemovalSite {
                name: site_name(SECTOR_NAMES, i),
                latitude,
                longitude,
                priority: rng.gen_range(1..=3).to_string(),
            }
        })
        .collect()
}

fn generate_disposal_sites(count: usize, rng: &mut impl Rng) -> Vec<DisposalSite> {
    (0..count)
        .map(|i| {
            let (latitude, longitude) = jitter_location(rng);
            // Quarries are effectively unlimited; street depots are not.
            let capacity_m3 = if rng.gen_bool(0.3) {
                rng.gen_range(10..=30) as f64 * 1e6
            } else {
                rng.gen_range(5..=95) as f64 * 1e5
            };
            DisposalSite {
                name: site_name(DEPOT_NAMES, i),
                latitude,
                longitude,
                capacity_m3,
                cost_per_m3: (rng.gen_range(0.8..=3.5_f64) * 100.0).round() / 100.0,
            }
        })
        .collect()
}

fn generate_plan(
    hub: &RemovalSite,
    removal_sites: &[RemovalSite],
    disposal_sites: &[DisposalSite],
    rng: &mut impl Rng,
) -> (HubResult, Vec<RouteDetail>) {
    let mut routes = Vec::new();
    let mut total_cost = FIXED_HUB_COST;

    for site in removal_sites.iter().filter(|s| s.name != hub.name) {
        // Some sectors are served by another hub.
        if rng.gen_bool(0.2) {
            continue;
        }
        let Some(depot) = disposal_sites.choose(rng) else {
            continue;
        };
        let volume = (rng.gen_range(50_000.0..=2_000_000.0_f64) / 1_000.0).round() * 1_000.0;
        total_cost += volume * depot.cost_per_m3;
        routes.push(RouteDetail {
            hub: hub.name.clone(),
            removal_site: site.name.clone(),
            disposal_site: depot.name.clone(),
            snow_transported: volume,
            start_lat: site.latitude,
            start_lng: site.longitude,
            end_lat: depot.latitude,
            end_lng: depot.longitude,
        });
    }

    let result = HubResult {
        hub: hub.name.clone(),
        total_cost: total_cost.round(),
    };
    (result, routes)
}

fn write_table<T: Serialize>(dir: &Path, file: &str, rows: &[T], latin1: bool) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().context("flushing CSV buffer")?;

    let bytes = if latin1 {
        String::from_utf8(bytes)?
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect()
    } else {
        bytes
    };

    let path = dir.join(file);
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("   {:<26} {:>6} rows", file, rows.len());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.removal_sites > 0, "--removal-sites must be at least 1");
    ensure!(args.disposal_sites > 0, "--disposal-sites must be at least 1");
    ensure!(
        args.hubs > 0 && args.hubs <= args.removal_sites,
        "--hubs must be between 1 and --removal-sites"
    );

    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let removal_sites = generate_removal_sites(args.removal_sites, &mut rng);
    let disposal_sites = generate_disposal_sites(args.disposal_sites, &mut rng);

    let mut hub_results = Vec::with_capacity(args.hubs);
    let mut route_details = Vec::new();
    for hub in removal_sites.choose_multiple(&mut rng, args.hubs) {
        let (result, routes) = generate_plan(hub, &removal_sites, &disposal_sites, &mut rng);
        hub_results.push(result);
        route_details.extend(routes);
    }

    std::fs::create_dir_all(&args.output_dir)?;

    println!("Writing sample plan to {}", args.output_dir.display());
    write_table(&args.output_dir, HUB_RESULTS_FILE, &hub_results, args.latin1)?;
    write_table(&args.output_dir, ROUTE_DETAILS_FILE, &route_details, args.latin1)?;
    write_table(&args.output_dir, DISPOSAL_SITES_FILE, &disposal_sites, args.latin1)?;
    write_table(&args.output_dir, REMOVAL_SITES_FILE, &removal_sites, args.latin1)?;
    println!(
        "Encoding: {}",
        if args.latin1 { "ISO-8859-1" } else { "UTF-8" }
    );

    Ok(())
}
