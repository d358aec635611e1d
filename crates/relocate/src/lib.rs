#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Relocation of build-time paths inside an installed SDK tree
//!
//! Several artifacts produced by the native builds embed absolute paths of
//! the machine that made the build: qmake resolves its compile-time prefix,
//! `.prl` files hardcode the library search path, and the generated
//! `sipconfig.py` records installation directories as Python constants.
//! This crate rewrites all of them to point at the SDK's current location.
//!
//! Every step is idempotent; running relocation twice leaves the tree
//! byte-identical to running it once. Rewrites go through a temp file and
//! an atomic rename, so a failure mid-run corrupts at most nothing.

mod fsops;
mod prl;
mod qtconf;
mod report;
mod sipconfig;

pub use report::Report;

use qpsdk_errors::Result;
use qpsdk_layout::InstallLayout;
use tracing::{debug, info};

/// Rewrite every relocatable artifact under `layout.root()`.
///
/// Missing artifacts (a tree without `.prl` files, an absent
/// `sipconfig.py`) are warnings in the returned report, not errors.
///
/// # Errors
///
/// Returns [`qpsdk_errors::RelocateError`] when an existing target file
/// cannot be read or rewritten.
pub fn relocate_sdk(layout: &InstallLayout) -> Result<Report> {
    info!(root = %layout.root().display(), "relocating SDK");

    let mut report = Report::ok();
    report.absorb(qtconf::write_qt_conf(layout)?);
    report.absorb(prl::rewrite_prl_files(layout)?);
    report.absorb(sipconfig::rewrite_sip_config(layout)?);

    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }
    debug!(
        changed = report.changed_files.len(),
        warnings = report.warnings.len(),
        "relocation finished"
    );

    Ok(report)
}
