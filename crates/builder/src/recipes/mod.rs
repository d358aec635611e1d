//! Per-package build recipes
//!
//! Each recipe drives one package's native configure/make pipeline inside
//! its source directory. Recipes hold no state; everything they need comes
//! in through [`RecipeContext`].

mod icu;
mod pyqt;
mod qt;
mod sip;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::plan::Package;
use crate::profile::BuildProfile;
use qpsdk_errors::Result;
use qpsdk_layout::{InstallLayout, SdkEnvironment};

pub use icu::IcuRecipe;
pub use pyqt::PyQtRecipe;
pub use qt::QtRecipe;
pub use sip::SipRecipe;

/// Everything a recipe needs for one build.
pub struct RecipeContext<'a> {
    pub layout: &'a InstallLayout,
    pub profile: &'a BuildProfile,
    pub env: &'a SdkEnvironment,
    pub source_dir: &'a Path,
    pub debug: bool,
}

/// A package's configure/make pipeline.
#[async_trait]
pub trait Recipe: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run the full configure/make/install sequence.
    async fn build(&self, ctx: &RecipeContext<'_>) -> Result<()>;
}

/// The recipe implementing `package`.
#[must_use]
pub fn recipe_for(package: Package) -> Box<dyn Recipe> {
    match package {
        Package::Icu => Box::new(IcuRecipe),
        Package::Qt => Box::new(QtRecipe),
        Package::Sip => Box::new(SipRecipe),
        Package::PyQt => Box::new(PyQtRecipe),
    }
}

/// Path of a file shipped next to the orchestrator binary (license files,
/// mkspec assets). Falls back to the working directory when the executable
/// path is unavailable.
pub(crate) fn orchestrator_path(name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map_or_else(|| PathBuf::from(name), |dir| dir.join(name))
}

/// Debug-build flags shared by the SIP and PyQt configure scripts.
pub(crate) fn push_debug_flags(debug: bool, args: &mut Vec<String>) {
    if !debug {
        return;
    }

    if cfg!(target_os = "windows") {
        // MSVC: optimized build with debug info; a true debug build would
        // need a debug Python.
        args.push("CFLAGS=/O2 /Zi".to_string());
        args.push("CXXFLAGS=/O2 /Zi".to_string());
        args.push("LFLAGS=/DEBUG /INCREMENTAL:NO /OPT:REF".to_string());
    } else {
        args.push("--debug".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_package_has_a_recipe() {
        for package in [Package::Icu, Package::Qt, Package::Sip, Package::PyQt] {
            assert_eq!(recipe_for(package).name(), package.as_str());
        }
    }

    #[test]
    fn assets_resolve_next_to_the_executable() {
        let path = orchestrator_path("qt-license.txt");
        assert_eq!(path.file_name().unwrap(), "qt-license.txt");
        if let Ok(exe) = std::env::current_exe() {
            assert_eq!(path.parent(), exe.parent());
        }
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn debug_flag_maps_to_configure_switch() {
        let mut args = Vec::new();
        push_debug_flags(true, &mut args);
        assert_eq!(args, vec!["--debug"]);

        args.clear();
        push_debug_flags(false, &mut args);
        assert!(args.is_empty());
    }
}
