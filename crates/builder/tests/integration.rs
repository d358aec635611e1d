//! Integration tests for build orchestration

use std::io::Write;

use qpsdk_builder::{BuildPlan, BuildProfile, Package, SourceSet};
use tempfile::NamedTempFile;

#[tokio::test]
async fn profile_loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "qt": {{ "common": ["-nomake", "examples"], "linux": ["-qt-xcb"] }} }}"#
    )
    .unwrap();

    let profile = BuildProfile::load(file.path()).await.unwrap();
    let args = profile.args_for(Package::Qt, "linux").unwrap();
    assert_eq!(args, vec!["-nomake", "examples", "-qt-xcb"]);
}

#[tokio::test]
async fn profile_io_errors_are_reported() {
    let missing = std::path::Path::new("/no/such/profile.json");
    assert!(BuildProfile::load(missing).await.is_err());
}

#[test]
fn explicit_sources_win_over_discovery() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sip-4.15.5")).unwrap();
    let explicit = dir.path().join("sip-9.9.9");
    std::fs::create_dir(&explicit).unwrap();

    let sources = SourceSet {
        sip: Some(explicit.clone()),
        ..SourceSet::default()
    }
    .discover_missing(dir.path());

    assert_eq!(sources.sip.as_deref(), Some(explicit.as_path()));
}

#[test]
fn plan_orders_icu_first_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "icu-52.1.0",
        "qt-everywhere-4.8.6",
        "sip-4.15.5",
        "PyQt-4.10.4",
    ] {
        std::fs::create_dir(dir.path().join(name)).unwrap();
    }

    let sources = SourceSet::default().discover_missing(dir.path());
    let plan = BuildPlan::assemble(&sources, true).unwrap();

    assert_eq!(
        plan.steps().iter().map(|s| s.package).collect::<Vec<_>>(),
        vec![Package::Icu, Package::Qt, Package::Sip, Package::PyQt]
    );
    assert_eq!(plan.version_of(Package::Qt), Some("4.8.6"));
}
