//! Command-line configuration shared by the binaries

use clap::{Args, Parser};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::loader::{
    DataPaths, DISPOSAL_SITES_FILE, HUB_RESULTS_FILE, REMOVAL_SITES_FILE, ROUTE_DETAILS_FILE,
};

/// Where the four plan tables live
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory holding the CSV files
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Hub results file name (relative to --data-dir)
    #[arg(long, default_value = HUB_RESULTS_FILE)]
    pub hub_results: PathBuf,

    /// Route details file name (relative to --data-dir)
    #[arg(long, default_value = ROUTE_DETAILS_FILE)]
    pub route_details: PathBuf,

    /// Disposal sites file name (relative to --data-dir)
    #[arg(long, default_value = DISPOSAL_SITES_FILE)]
    pub disposal_sites: PathBuf,

    /// Removal sites file name (relative to --data-dir)
    #[arg(long, default_value = REMOVAL_SITES_FILE)]
    pub removal_sites: PathBuf,
}

impl DataArgs {
    pub fn paths(&self) -> DataPaths {
        DataPaths {
            hub_results: self.data_dir.join(&self.hub_results),
            route_details: self.data_dir.join(&self.route_details),
            disposal_sites: self.data_dir.join(&self.disposal_sites),
            removal_sites: self.data_dir.join(&self.removal_sites),
        }
    }
}

/// Snow removal dashboard server
#[derive(Parser, Debug)]
#[command(name = "snow_dashboard")]
#[command(about = "Serve the snow removal plan dashboard")]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(long, default_value_t = 8501)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[command(flatten)]
    pub data: DataArgs,
}

impl ServerArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
