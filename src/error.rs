use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is not valid {encoding}", .path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    #[error("Background load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("The hub results table is empty")]
    NoHubs,

    #[error("Unknown hub: {0}")]
    UnknownHub(String),

    #[error("Hub {0} has no entry in the removal sites table")]
    HubNotInRemovalSites(String),

    #[error("Disposal site {site} has zero capacity")]
    ZeroCapacity { site: String },
}

impl DashboardError {
    /// True for the failures a selection can cause, as opposed to bad input files.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DashboardError::UnknownHub(_) | DashboardError::HubNotInRemovalSites(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
