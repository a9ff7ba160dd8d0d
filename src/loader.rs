//! CSV loading for the four plan tables
//!
//! All four files are decoded with the same encoding. UTF-8 is tried first;
//! if any file is not valid UTF-8 the whole set is read again as Latin-1.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{DashboardError, Result};
use crate::models::Dataset;

pub const HUB_RESULTS_FILE: &str = "Optimal_Hub_Results.csv";
pub const ROUTE_DETAILS_FILE: &str = "Route_Details.csv";
pub const DISPOSAL_SITES_FILE: &str = "Disposal_Sites.csv";
pub const REMOVAL_SITES_FILE: &str = "Removal_Sites.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    Utf8,
    /// ISO-8859-1
    Latin1,
}

impl TextEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO-8859-1",
        }
    }

    fn decode(&self, path: &Path, bytes: Vec<u8>) -> Result<String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|_| DashboardError::Decode {
                path: path.to_path_buf(),
                encoding: self.label(),
            }),
            // Every byte maps to the code point of the same value.
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Locations of the four input tables
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub hub_results: PathBuf,
    pub route_details: PathBuf,
    pub disposal_sites: PathBuf,
    pub removal_sites: PathBuf,
}

impl DataPaths {
    /// Default file names resolved against `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            hub_results: dir.join(HUB_RESULTS_FILE),
            route_details: dir.join(ROUTE_DETAILS_FILE),
            disposal_sites: dir.join(DISPOSAL_SITES_FILE),
            removal_sites: dir.join(REMOVAL_SITES_FILE),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

/// Load all four tables, falling back to Latin-1 for the whole set on a decode failure.
pub fn load_dataset(paths: &DataPaths) -> Result<Dataset> {
    let dataset = match load_with_encoding(paths, TextEncoding::Utf8) {
        Err(DashboardError::Decode { path, .. }) => {
            warn!(
                "{} is not valid UTF-8, reloading all tables as {}",
                path.display(),
                TextEncoding::Latin1
            );
            load_with_encoding(paths, TextEncoding::Latin1)?
        }
        other => other?,
    };

    info!(
        "Loaded {} hub results, {} routes, {} disposal sites, {} removal sites ({})",
        dataset.hub_results.len(),
        dataset.route_details.len(),
        dataset.disposal_sites.len(),
        dataset.removal_sites.len(),
        dataset.encoding
    );

    for finding in dataset.integrity_report() {
        warn!("Data integrity: {}", finding);
    }

    Ok(dataset)
}

/// Load all four tables with one encoding and no fallback.
pub fn load_with_encoding(paths: &DataPaths, encoding: TextEncoding) -> Result<Dataset> {
    Ok(Dataset {
        hub_results: read_table(&paths.hub_results, encoding)?,
        route_details: read_table(&paths.route_details, encoding)?,
        disposal_sites: read_table(&paths.disposal_sites, encoding)?,
        removal_sites: read_table(&paths.removal_sites, encoding)?,
        encoding,
    })
}

fn read_table<T: DeserializeOwned>(path: &Path, encoding: TextEncoding) -> Result<Vec<T>> {
    let bytes = std::fs::read(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = encoding.decode(path, bytes)?;
    parse_table(path, &text)
}

fn parse_table<T: DeserializeOwned>(path: &Path, text: &str) -> Result<Vec<T>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| DashboardError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisposalSite, RemovalSite};

    #[test]
    fn test_latin1_decodes_every_byte() {
        let text = TextEncoding::Latin1
            .decode(Path::new("x.csv"), vec![b'D', 0xE9, b'p', b'o', b't'])
            .unwrap();
        assert_eq!(text, "Dépot");
    }

    #[test]
    fn test_utf8_rejects_latin1_bytes() {
        let err = TextEncoding::Utf8
            .decode(Path::new("x.csv"), vec![b'D', 0xE9])
            .unwrap_err();
        assert!(matches!(err, DashboardError::Decode { encoding: "UTF-8", .. }));
    }

    #[test]
    fn test_parse_table_handles_spaced_headers_and_bom() {
        let text = "\u{feff}NomDepot,Latitude,Longitude,Capacite m3,Cost ($/m3)\nD1,45.5,-73.6,5000000,1.25\n";
        let sites: Vec<DisposalSite> = parse_table(Path::new("d.csv"), text).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].name, "D1");
        assert_eq!(sites[0].capacity_m3, 5_000_000.0);
        assert_eq!(sites[0].cost_per_m3, 1.25);
    }

    #[test]
    fn test_parse_table_reports_missing_column() {
        let text = "NomSecteur,Latitude,Longitude\nS1,45.5,-73.6\n";
        let err = parse_table::<RemovalSite>(Path::new("r.csv"), text).unwrap_err();
        assert!(matches!(err, DashboardError::Csv { .. }));
    }

    #[test]
    fn test_default_paths_use_working_directory() {
        let paths = DataPaths::default();
        assert_eq!(paths.route_details, Path::new(".").join(ROUTE_DETAILS_FILE));
    }
}
