//! qt.conf writer
//!
//! qmake falls back to the prefix hardwired at compile time unless a
//! `qt.conf` next to it says otherwise. Writing one with the current root
//! makes the Qt half of the SDK relocatable without touching any binary.

use crate::{fsops, Report};
use qpsdk_errors::Result;
use qpsdk_layout::InstallLayout;

pub(crate) fn write_qt_conf(layout: &InstallLayout) -> Result<Report> {
    let path = layout.bin().join("qt.conf");
    // qmake expects forward slashes even on Windows.
    let prefix = layout.root().display().to_string().replace('\\', "/");
    let contents = format!("[Paths]\nPrefix = {prefix}\n");

    let mut report = Report::ok();
    if std::fs::read_to_string(&path).is_ok_and(|existing| existing == contents) {
        return Ok(report);
    }

    fsops::write_atomic(&path, &contents)?;
    report.changed_files.push(path);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpsdk_layout::PythonVersion;

    #[test]
    fn writes_prefix_for_current_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("bin")).unwrap();
        let layout = InstallLayout::resolve(dir.path(), PythonVersion::new(3, 9)).unwrap();

        let report = write_qt_conf(&layout).unwrap();
        assert_eq!(report.changed_files.len(), 1);

        let contents = std::fs::read_to_string(layout.bin().join("qt.conf")).unwrap();
        assert!(contents.starts_with("[Paths]\n"));
        assert!(contents.contains(&format!("Prefix = {}", layout.root().display())));
    }

    #[test]
    fn rewrite_is_a_noop_when_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("bin")).unwrap();
        let layout = InstallLayout::resolve(dir.path(), PythonVersion::new(3, 9)).unwrap();

        write_qt_conf(&layout).unwrap();
        let report = write_qt_conf(&layout).unwrap();
        assert!(report.changed_files.is_empty());
    }
}
