//! SDK environment derived from a resolved layout
//!
//! The original process environment is never mutated. [`SdkEnvironment`] is
//! an explicit value computed once from an [`InstallLayout`]; callers apply
//! it to child-process invocations or render it as shell export lines.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::InstallLayout;

/// Sentinel variable marking an environment that already went through setup.
pub const SETUP_SENTINEL: &str = "QPSDK_SETUP_DONE";

/// Ordered set of environment variables activating an SDK installation.
#[derive(Debug, Clone)]
pub struct SdkEnvironment {
    vars: Vec<(String, String)>,
}

impl SdkEnvironment {
    /// Compute the environment for `layout`, layering the SDK search paths
    /// over the current process environment.
    #[must_use]
    pub fn for_layout(layout: &InstallLayout) -> Self {
        let mut vars = Vec::new();

        let mut path_entries = vec![layout.bin().to_path_buf()];
        if cfg!(target_os = "windows") {
            // DLLs are resolved through PATH on Windows.
            path_entries.push(layout.lib().to_path_buf());
        }
        vars.push(("PATH".to_string(), prepend_paths("PATH", path_entries)));

        vars.push((
            "PYTHONPATH".to_string(),
            layout.python().display().to_string(),
        ));
        vars.push(("QTDIR".to_string(), layout.root().display().to_string()));
        vars.push((
            "QT_PLUGIN_PATH".to_string(),
            layout.plugins().display().to_string(),
        ));

        match std::env::consts::OS {
            "macos" => {
                let lib = layout.lib().display().to_string();
                vars.push(("DYLD_FRAMEWORK_PATH".to_string(), lib.clone()));
                vars.push(("DYLD_LIBRARY_PATH".to_string(), lib));
            }
            "windows" => {
                vars.push((
                    "INCLUDE".to_string(),
                    prepend_paths("INCLUDE", vec![layout.include().to_path_buf()]),
                ));
                vars.push((
                    "LIB".to_string(),
                    prepend_paths("LIB", vec![layout.lib().to_path_buf()]),
                ));
            }
            _ => {
                vars.push((
                    "LD_LIBRARY_PATH".to_string(),
                    layout.lib().display().to_string(),
                ));
            }
        }

        vars.push((SETUP_SENTINEL.to_string(), "1".to_string()));

        Self { vars }
    }

    /// The variables in application order.
    #[must_use]
    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }

    /// Look up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render the environment as lines for the current shell.
    #[must_use]
    pub fn export_lines(&self) -> Vec<String> {
        self.vars
            .iter()
            .map(|(name, value)| {
                if cfg!(target_os = "windows") {
                    format!("set {name}={value}")
                } else {
                    format!("export {name}='{}'", value.replace('\'', r"'\''"))
                }
            })
            .collect()
    }

    /// True when the current process already runs inside a set-up SDK
    /// environment.
    #[must_use]
    pub fn is_already_active() -> bool {
        std::env::var_os(SETUP_SENTINEL).is_some()
    }
}

/// Prepend `entries` to the current value of the path-list variable `name`.
fn prepend_paths(name: &str, entries: Vec<PathBuf>) -> String {
    let existing = std::env::var_os(name).unwrap_or_else(OsString::new);
    let all: Vec<PathBuf> = entries
        .into_iter()
        .chain(std::env::split_paths(&existing).filter(|p| !p.as_os_str().is_empty()))
        .collect();

    match std::env::join_paths(all.iter()) {
        Ok(joined) => joined.to_string_lossy().into_owned(),
        // An inherited entry contained the separator itself; join lossily
        // instead of aborting environment setup.
        Err(_) => all
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(if cfg!(target_os = "windows") { ";" } else { ":" }),
    }
}
