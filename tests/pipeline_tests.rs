mod common;

use snow_removal_dashboard::utilization::{Capacity, Utilization};
use snow_removal_dashboard::{
    build_view, load_dataset, DashboardError, DashboardState, DataPaths, TextEncoding,
};
use tempfile::TempDir;

#[test]
fn test_load_utf8_plan() {
    let dir = common::sample_plan();
    let dataset = load_dataset(&DataPaths::in_dir(dir.path())).unwrap();

    assert_eq!(dataset.encoding, TextEncoding::Utf8);
    assert_eq!(dataset.hub_results.len(), 2);
    assert_eq!(dataset.route_details.len(), 4);
    assert_eq!(dataset.disposal_sites.len(), 3);
    assert_eq!(dataset.removal_sites.len(), 4);
    assert!(dataset.integrity_report().is_empty());
}

#[test]
fn test_latin1_fallback_reloads_every_file() {
    let dir = TempDir::new().unwrap();
    common::write_files(
        dir.path(),
        b"NomSecteur,Latitude,Longitude,Priority\nA,45.50,-73.57,1\nMontr\xe9al,45.51,-73.56,2\n",
    );
    // Valid UTF-8 "é" in another file must be read as Latin-1 too.
    std::fs::write(
        dir.path().join("Optimal_Hub_Results.csv"),
        "Hub,TotalCost\nA,5000000\nC\u{e9},1\n",
    )
    .unwrap();

    let dataset = load_dataset(&DataPaths::in_dir(dir.path())).unwrap();

    assert_eq!(dataset.encoding, TextEncoding::Latin1);
    assert_eq!(dataset.removal_sites[1].name, "Montréal");
    assert_eq!(dataset.hub_results[1].hub, "C\u{c3}\u{a9}");
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = common::sample_plan();
    std::fs::remove_file(dir.path().join("Disposal_Sites.csv")).unwrap();

    let err = load_dataset(&DataPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, DashboardError::Io { .. }));
}

#[test]
fn test_malformed_row_is_fatal() {
    let dir = common::sample_plan();
    std::fs::write(
        dir.path().join("Optimal_Hub_Results.csv"),
        "Hub,TotalCost\nA,not-a-number\n",
    )
    .unwrap();

    let err = load_dataset(&DataPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, DashboardError::Csv { .. }));
}

#[test]
fn test_view_for_hub_a() {
    let dir = common::sample_plan();
    let dataset = load_dataset(&DataPaths::in_dir(dir.path())).unwrap();

    let view = build_view(&dataset, &DashboardState::new("A")).unwrap();

    assert_eq!(view.cost_line, "Total Cost for A: $5.00 M");

    // D2 only receives snow from hub B.
    let names: Vec<&str> = view.utilization.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["D1", "Q1"]);

    let d1 = &view.utilization[0];
    assert_eq!(d1.capacity, Capacity::Bounded(5.0));
    assert_eq!(d1.total_snow_disposed, 300_000.0);
    assert_eq!(d1.utilization, Utilization::Percent(6.0));

    let q1 = &view.utilization[1];
    assert_eq!(q1.capacity, Capacity::Unlimited);
    assert_eq!(q1.utilization, Utilization::NotApplicable);

    // Hub marker, three other removal sites, three disposal sites.
    assert_eq!(view.map.markers.len(), 7);
    assert_eq!(view.map.lines.len(), 3);
    assert_eq!(view.map.lines[2].weight, 9.0);
}

#[test]
fn test_view_for_hub_missing_from_removal_sites() {
    let dir = TempDir::new().unwrap();
    common::write_files(
        dir.path(),
        b"NomSecteur,Latitude,Longitude,Priority\nA,45.50,-73.57,1\n",
    );
    let dataset = load_dataset(&DataPaths::in_dir(dir.path())).unwrap();

    let err = build_view(&dataset, &DashboardState::new("B")).unwrap_err();
    assert!(matches!(err, DashboardError::HubNotInRemovalSites(h) if h == "B"));
}
