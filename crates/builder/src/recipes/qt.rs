//! Qt build recipe
//!
//! Assembles the configure invocation from the layout, the build profile
//! and the platform, then runs configure/make/make install and sweeps the
//! libtool `.la` droppings out of the install root.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use super::{orchestrator_path, Recipe, RecipeContext};
use crate::exec::{make, platform_key, run_logged};
use crate::plan::Package;
use qpsdk_errors::{Error, Result};

/// Commercial license file shipped next to the orchestrator binary.
const QT_LICENSE_FILE: &str = "qt-license.txt";

/// MSVC mkspec variant shipped next to the orchestrator binary, under
/// `mkspecs/`. Produces an optimized build that still carries debug info.
const RELWITHDEBINFO_MKSPEC: &str = "qt4-win32-msvc2008-relwithdebinfo.conf";

pub struct QtRecipe;

#[async_trait]
impl Recipe for QtRecipe {
    fn name(&self) -> &'static str {
        "qt"
    }

    async fn build(&self, ctx: &RecipeContext<'_>) -> Result<()> {
        let is_qt5 = is_qt5(ctx.source_dir);

        // The UNIX source tarball has no pre-built configure.exe; touching
        // qtbase/.gitignore makes Qt 5's configure bootstrap it.
        if is_qt5 {
            tokio::fs::write(ctx.source_dir.join("qtbase").join(".gitignore"), b"").await?;
        }

        let mut args: Vec<String> = vec![
            "-confirm-license".to_string(),
            "-prefix".to_string(),
            ctx.layout.root().display().to_string(),
            "-shared".to_string(),
            license_flag().await.to_string(),
        ];

        args.extend(ctx.profile.args_for(Package::Qt, platform_key())?);

        match build_mode(ctx.debug, cfg!(target_os = "windows")) {
            QtBuildMode::Release => args.push("-release".to_string()),
            QtBuildMode::Debug => args.push("-debug".to_string()),
            QtBuildMode::ReleaseWithDebugInfo => {
                let asset = orchestrator_path("mkspecs").join(RELWITHDEBINFO_MKSPEC);
                install_relwithdebinfo_mkspec(&asset, ctx.source_dir).await?;
                args.push("-release".to_string());
            }
        }

        // Point the compiler at the locally built ICU.
        if matches!(std::env::consts::OS, "macos" | "windows") {
            args.push("-I".to_string());
            args.push(ctx.layout.include().display().to_string());
            args.push("-L".to_string());
            args.push(ctx.layout.lib().display().to_string());
        }

        // Qt 4 only builds with clang on modern macOS via this spec.
        if cfg!(target_os = "macos") && !is_qt5 && Path::new("/usr/bin/clang").is_file() {
            args.push("-platform".to_string());
            args.push("unsupported/macx-clang".to_string());
        }

        if cfg!(target_os = "windows") {
            args.push("-mp".to_string());
        }

        let configure = configure_program(is_qt5);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        run_logged(configure, &arg_refs, ctx.source_dir, ctx.env).await?;
        make(&[], ctx.source_dir, ctx.env).await?;
        make(&["install"], ctx.source_dir, ctx.env).await?;

        remove_la_files(ctx.layout.root());
        Ok(())
    }
}

/// How a Qt build is configured for the requested build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QtBuildMode {
    Release,
    Debug,
    /// Windows only: a true debug Qt drags debug CRT requirements into
    /// everything linked against it, so the build stays `-release` with a
    /// debug-info mkspec swapped in.
    ReleaseWithDebugInfo,
}

fn build_mode(debug: bool, windows: bool) -> QtBuildMode {
    match (debug, windows) {
        (false, _) => QtBuildMode::Release,
        (true, false) => QtBuildMode::Debug,
        (true, true) => QtBuildMode::ReleaseWithDebugInfo,
    }
}

/// Overwrite the source tree's MSVC mkspec with the release-with-debug-info
/// variant before configure reads it.
async fn install_relwithdebinfo_mkspec(asset: &Path, source_dir: &Path) -> Result<()> {
    let target = source_dir
        .join("mkspecs")
        .join("win32-msvc2008")
        .join("qmake.conf");
    tokio::fs::copy(asset, &target)
        .await
        .map_err(|e| Error::io_with_path(&e, &target))?;
    Ok(())
}

fn is_qt5(source_dir: &Path) -> bool {
    source_dir.join("qtbase").is_dir()
}

fn configure_program(is_qt5: bool) -> &'static str {
    if cfg!(target_os = "windows") {
        if is_qt5 {
            "configure.bat"
        } else {
            "configure.exe"
        }
    } else {
        "./configure"
    }
}

/// `-commercial` when a license file ships next to the orchestrator
/// (installed to the home directory where configure looks for it),
/// `-opensource` otherwise.
async fn license_flag() -> &'static str {
    let license = orchestrator_path(QT_LICENSE_FILE);
    if !license.is_file() {
        return "-opensource";
    }

    match dirs::home_dir() {
        Some(home) => {
            if let Err(e) = tokio::fs::copy(&license, home.join(".qt-license")).await {
                warn!("cannot install {QT_LICENSE_FILE}: {e}; building -opensource");
                return "-opensource";
            }
            "-commercial"
        }
        None => {
            warn!("no home directory for .qt-license; building -opensource");
            "-opensource"
        }
    }
}

/// Delete every libtool archive under the install root; `.la` files pin
/// build-machine paths and break relocation.
fn remove_la_files(root: &Path) {
    let mut removed: Vec<PathBuf> = Vec::new();

    for entry in WalkBuilder::new(root).hidden(false).parents(false).build() {
        let Ok(entry) = entry else { continue };
        let path = entry.into_path();
        if path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some("la")
            && std::fs::remove_file(&path).is_ok()
        {
            removed.push(path);
        }
    }

    if !removed.is_empty() {
        debug!(count = removed.len(), "removed libtool archives");
    }
}
