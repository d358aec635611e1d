//! `sipconfig.py` key rewrite
//!
//! SIP's configure step generates a Python module whose `_pkg_config`
//! dictionary records the installation directories of the machine that made
//! the build, as `'key': 'value',` lines. A fixed set of those keys is
//! overwritten with the current layout paths; every other line stays
//! byte-identical. A key whose line does not have the expected shape is
//! skipped with a warning rather than failing the run, so a newer SIP that
//! changes the module's format degrades loudly instead of corrupting it.

use std::path::PathBuf;

use regex::Regex;

use crate::{fsops, Report};
use qpsdk_errors::Result;
use qpsdk_layout::InstallLayout;

pub(crate) fn rewrite_sip_config(layout: &InstallLayout) -> Result<Report> {
    let path = layout.sip_config_file();
    let mut report = Report::ok();

    if !path.is_file() {
        // Static or partial builds may not ship SIP at all.
        report.warnings.push(format!(
            "missing generated SIP configuration {}; skipping",
            path.display()
        ));
        return Ok(report);
    }

    let contents = fsops::read_text(&path)?;
    let outcome = rewrite_keys(&contents, &relocation_targets(layout));
    report.warnings.extend(
        outcome
            .skipped_keys
            .iter()
            .map(|key| format!("{}: no '{key}': '...' line; key left untouched", path.display())),
    );

    if let Some(rewritten) = outcome.contents {
        fsops::write_atomic(&path, &rewritten)?;
        report.changed_files.push(path);
    }

    Ok(report)
}

/// The fixed key set and the layout path each one must point at.
fn relocation_targets(layout: &InstallLayout) -> Vec<(&'static str, PathBuf)> {
    let sip_bin = if cfg!(target_os = "windows") {
        layout.bin().join("sip.exe")
    } else {
        layout.bin().join("sip")
    };

    vec![
        ("default_bin_dir", layout.bin().to_path_buf()),
        ("default_mod_dir", layout.python().to_path_buf()),
        ("default_sip_dir", layout.sip().to_path_buf()),
        ("sip_bin", sip_bin),
        ("sip_inc_dir", layout.include().to_path_buf()),
        ("sip_mod_dir", layout.python().to_path_buf()),
    ]
}

struct RewriteOutcome {
    /// New file contents, or `None` when nothing changed.
    contents: Option<String>,
    /// Keys whose expected line shape was not found.
    skipped_keys: Vec<&'static str>,
}

fn rewrite_keys(contents: &str, targets: &[(&'static str, PathBuf)]) -> RewriteOutcome {
    let mut result = contents.to_string();
    let mut skipped_keys = Vec::new();

    for (key, value) in targets {
        let pattern = Regex::new(&format!(
            r"(?m)^(?P<head>\s*'{}'\s*:\s*')(?P<old>[^']*)(?P<tail>'.*)$",
            regex::escape(key)
        ))
        .unwrap();

        let Some(caps) = pattern.captures(&result) else {
            skipped_keys.push(*key);
            continue;
        };

        let new_value = value.display().to_string();
        if &caps["old"] == new_value {
            continue;
        }

        let replacement = format!("{}{}{}", &caps["head"], new_value, &caps["tail"]);
        let range = caps.get(0).unwrap().range();
        result.replace_range(range, &replacement);
    }

    RewriteOutcome {
        contents: (result != contents).then_some(result),
        skipped_keys,
    }
}
