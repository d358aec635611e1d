//! Integration tests for layout resolution against a real directory tree

use std::path::Path;

use qpsdk_layout::{InstallLayout, PythonVersion, SdkEnvironment};

#[tokio::test]
async fn skeleton_creates_every_layout_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("sdk");
    let layout = InstallLayout::resolve(&root, PythonVersion::new(3, 9)).unwrap();

    layout.create_skeleton().await.unwrap();

    for (_, dir) in layout.dirs() {
        assert!(dir.is_dir(), "{}", dir.display());
    }
}

#[tokio::test]
async fn verify_reports_whats_missing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("sdk");
    let layout = InstallLayout::resolve(&root, PythonVersion::new(3, 9)).unwrap();

    // Nothing on disk yet: all seven directories plus sipconfig.py.
    assert_eq!(layout.verify().len(), 8);

    layout.create_skeleton().await.unwrap();
    std::fs::write(layout.sip_config_file(), "_pkg_config = {}\n").unwrap();
    assert!(layout.verify().is_empty());
}

#[tokio::test]
async fn skeleton_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let layout = InstallLayout::resolve(dir.path(), PythonVersion::new(3, 9)).unwrap();

    layout.create_skeleton().await.unwrap();
    layout.create_skeleton().await.unwrap();
}

#[test]
fn environment_tracks_resolved_layout() {
    let layout = InstallLayout::resolve(Path::new("/opt/sdk"), PythonVersion::new(3, 11)).unwrap();
    let env = SdkEnvironment::for_layout(&layout);

    assert_eq!(env.get("QTDIR"), Some("/opt/sdk"));
    assert_eq!(env.get("PYTHONPATH"), Some("/opt/sdk/python3.11"));
}
