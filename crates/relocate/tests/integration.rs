//! Integration tests for SDK relocation

use std::fs;
use std::path::Path;

use qpsdk_layout::{InstallLayout, PythonVersion};
use qpsdk_relocate::relocate_sdk;

fn make_sdk(root: &Path) -> InstallLayout {
    let layout = InstallLayout::resolve(root, PythonVersion::new(3, 9)).unwrap();
    for dir in ["bin", "include", "lib", "plugins", "python3.9", "share/sip"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    layout
}

fn seed_prl(layout: &InstallLayout, name: &str, contents: &str) {
    fs::write(layout.lib().join(name), contents).unwrap();
}

fn seed_sipconfig(layout: &InstallLayout) {
    let contents = concat!(
        "# This module is generated by SIP's configure.py.\n",
        "_pkg_config = {\n",
        "    'arch':            '',\n",
        "    'default_bin_dir': '/build/machine/bin',\n",
        "    'default_mod_dir': '/build/machine/python',\n",
        "    'default_sip_dir': '/build/machine/share/sip',\n",
        "    'py_version':      0x030900,\n",
        "    'sip_bin':         '/build/machine/bin/sip',\n",
        "    'sip_inc_dir':     '/build/machine/include',\n",
        "    'sip_mod_dir':     '/build/machine/python',\n",
        "}\n",
    );
    fs::write(layout.sip_config_file(), contents).unwrap();
}

#[test]
fn rewrites_prl_search_paths_to_current_lib() {
    let dir = tempfile::tempdir().unwrap();
    let layout = make_sdk(dir.path());
    seed_prl(
        &layout,
        "libQtCore.prl",
        "QMAKE_PRL_DEFINES = QT_SHARED\nQMAKE_PRL_LIBS = -L/build/machine/lib -lz\n",
    );

    relocate_sdk(&layout).unwrap();

    let rewritten = fs::read_to_string(layout.lib().join("libQtCore.prl")).unwrap();
    assert_eq!(
        rewritten,
        format!(
            "QMAKE_PRL_DEFINES = QT_SHARED\nQMAKE_PRL_LIBS = -L{} -lz\n",
            layout.lib().display()
        )
    );
}

#[test]
fn rewrites_sipconfig_fixed_keys_only() {
    let dir = tempfile::tempdir().unwrap();
    let layout = make_sdk(dir.path());
    seed_sipconfig(&layout);

    relocate_sdk(&layout).unwrap();

    let rewritten = fs::read_to_string(layout.sip_config_file()).unwrap();
    assert!(rewritten.contains(&format!(
        "    'sip_mod_dir':     '{}',\n",
        layout.python().display()
    )));
    assert!(rewritten.contains(&format!(
        "    'default_bin_dir': '{}',\n",
        layout.bin().display()
    )));
    // Lines outside the fixed key set stay byte-identical.
    assert!(rewritten.contains("    'arch':            '',\n"));
    assert!(rewritten.contains("    'py_version':      0x030900,\n"));
}

#[test]
fn relocation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let layout = make_sdk(dir.path());
    seed_prl(&layout, "libQtGui.prl", "QMAKE_PRL_LIBS = -L/old/lib -lfoo\n");
    seed_sipconfig(&layout);

    relocate_sdk(&layout).unwrap();
    let prl_once = fs::read_to_string(layout.lib().join("libQtGui.prl")).unwrap();
    let sip_once = fs::read_to_string(layout.sip_config_file()).unwrap();
    let qtconf_once = fs::read_to_string(layout.bin().join("qt.conf")).unwrap();

    let report = relocate_sdk(&layout).unwrap();
    assert!(report.changed_files.is_empty());
    assert_eq!(
        fs::read_to_string(layout.lib().join("libQtGui.prl")).unwrap(),
        prl_once
    );
    assert_eq!(fs::read_to_string(layout.sip_config_file()).unwrap(), sip_once);
    assert_eq!(
        fs::read_to_string(layout.bin().join("qt.conf")).unwrap(),
        qtconf_once
    );
}

#[test]
fn tree_without_descriptor_files_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let layout = make_sdk(dir.path());
    seed_sipconfig(&layout);

    let report = relocate_sdk(&layout).unwrap();
    let prl_changes: Vec<_> = report
        .changed_files
        .iter()
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("prl"))
        .collect();
    assert!(prl_changes.is_empty());
}

#[test]
fn missing_sipconfig_is_a_warning_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let layout = make_sdk(dir.path());

    let report = relocate_sdk(&layout).unwrap();
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("sipconfig.py")));
}

#[test]
fn qt_conf_points_at_current_root() {
    let dir = tempfile::tempdir().unwrap();
    let layout = make_sdk(dir.path());

    relocate_sdk(&layout).unwrap();

    let qt_conf = fs::read_to_string(layout.bin().join("qt.conf")).unwrap();
    assert_eq!(
        qt_conf,
        format!("[Paths]\nPrefix = {}\n", layout.root().display())
    );
}

#[test]
fn prl_files_in_nested_directories_are_found() {
    let dir = tempfile::tempdir().unwrap();
    let layout = make_sdk(dir.path());
    let nested = layout.plugins().join("imageformats");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        nested.join("libqjpeg.prl"),
        "QMAKE_PRL_LIBS = -L/build/machine/lib\n",
    )
    .unwrap();

    relocate_sdk(&layout).unwrap();

    let rewritten = fs::read_to_string(nested.join("libqjpeg.prl")).unwrap();
    assert!(rewritten.contains(&format!("-L{}", layout.lib().display())));
}
