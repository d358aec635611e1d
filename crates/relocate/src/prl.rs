//! `.prl` linker-path rewrite
//!
//! qmake writes the library search path into `.prl` files at install time.
//! Every `-L<path>` argument is pointed back at the layout's lib directory.
//! Only the path token changes; surrounding whitespace and the remaining
//! tokens of the line are preserved byte-for-byte.

use ignore::WalkBuilder;
use regex::Regex;

use crate::{fsops, Report};
use qpsdk_errors::Result;
use qpsdk_layout::InstallLayout;

pub(crate) fn rewrite_prl_files(layout: &InstallLayout) -> Result<Report> {
    let lib = layout.lib().display().to_string();
    let mut report = Report::ok();

    let targets: Vec<_> = WalkBuilder::new(layout.root())
        .hidden(false)
        .parents(false)
        .build()
        .filter_map(std::result::Result::ok)
        .map(ignore::DirEntry::into_path)
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("prl"))
        .collect();

    // Zero descriptor files is a no-op, not an error.
    for path in targets {
        let contents = fsops::read_text(&path)?;
        if let Some(rewritten) = rewrite_linker_paths(&contents, &lib) {
            fsops::write_atomic(&path, &rewritten)?;
            report.changed_files.push(path);
        }
    }

    Ok(report)
}

/// Replace the path argument of every `-L` flag with `lib`.
///
/// Returns `None` when the contents are already correct.
fn rewrite_linker_paths(contents: &str, lib: &str) -> Option<String> {
    let linker_path = Regex::new(r"-L\S+").unwrap();
    let replacement = format!("-L{lib}");

    let rewritten = linker_path.replace_all(contents, regex::NoExpand(&replacement));
    if rewritten == contents {
        None
    } else {
        Some(rewritten.into_owned())
    }
}
