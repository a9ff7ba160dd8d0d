#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;

pub const HUB_RESULTS: &str = "Hub,TotalCost\nA,5000000\nB,7250000\n";

pub const ROUTE_DETAILS: &str = "\
Hub,RemovalSite,DisposalSite,SnowTransported,Start_Lat,Start_Lng,End_Lat,End_Lng
A,S1,D1,100000,45.52,-73.58,45.60,-73.50
A,S2,D1,200000,45.48,-73.62,45.60,-73.50
A,S2,Q1,1800000,45.48,-73.62,45.55,-73.70
B,S1,D2,400000,45.52,-73.58,45.45,-73.55
";

pub const DISPOSAL_SITES: &str = "\
NomDepot,Latitude,Longitude,Capacite m3,Cost ($/m3)
D1,45.60,-73.50,5000000,1.5
D2,45.45,-73.55,2000000,2.25
Q1,45.55,-73.70,25000000,0.9
";

pub const REMOVAL_SITES: &str = "\
NomSecteur,Latitude,Longitude,Priority
A,45.50,-73.57,1
B,45.53,-73.60,2
S1,45.52,-73.58,1
S2,45.48,-73.62,3
";

pub fn write_files(dir: &Path, removal_sites: &[u8]) {
    std::fs::write(dir.join("Optimal_Hub_Results.csv"), HUB_RESULTS).unwrap();
    std::fs::write(dir.join("Route_Details.csv"), ROUTE_DETAILS).unwrap();
    std::fs::write(dir.join("Disposal_Sites.csv"), DISPOSAL_SITES).unwrap();
    std::fs::write(dir.join("Removal_Sites.csv"), removal_sites).unwrap();
}

/// Temp directory holding a small, consistent UTF-8 plan
pub fn sample_plan() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_files(dir.path(), REMOVAL_SITES.as_bytes());
    dir
}
