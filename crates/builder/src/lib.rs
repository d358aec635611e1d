#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Build orchestration for the qpsdk SDK
//!
//! Sequences the native builds of ICU, Qt, SIP and PyQt into a single
//! install root: source discovery, per-package configure/make recipes with
//! platform-specific flags, install-root preparation, and tar.gz packaging
//! of the finished tree. Execution is strictly sequential; every external
//! command gets its working directory and environment passed explicitly.

mod exec;
mod package;
mod plan;
mod profile;
mod recipes;

pub use exec::{detect_python_version, make, platform_key, preflight, python_interpreter, run_logged};
pub use package::{archive_sdk, install_orchestrator};
pub use plan::{discover_source, extract_version, BuildPlan, BuildStep, Package, SourceSet};
pub use profile::BuildProfile;
pub use recipes::{recipe_for, Recipe, RecipeContext};

use qpsdk_errors::Result;
use qpsdk_layout::{InstallLayout, SdkEnvironment};
use tracing::info;

/// Create the install-root skeleton before any recipe runs.
///
/// # Errors
///
/// Returns an error if a layout directory cannot be created.
pub async fn prepare_install_root(layout: &InstallLayout) -> Result<()> {
    layout.create_skeleton().await
}

/// Run every step of `plan` in order, aborting on the first failure.
///
/// # Errors
///
/// Returns the first recipe error; nothing is retried.
pub async fn run_plan(
    plan: &BuildPlan,
    layout: &InstallLayout,
    profile: &BuildProfile,
    env: &SdkEnvironment,
    debug: bool,
) -> Result<()> {
    for step in plan.steps() {
        info!(
            package = %step.package,
            version = %step.version,
            source = %step.source_dir.display(),
            "building"
        );

        let recipe = recipe_for(step.package);
        let ctx = RecipeContext {
            layout,
            profile,
            env,
            source_dir: &step.source_dir,
            debug,
        };
        recipe.build(&ctx).await?;
    }

    Ok(())
}
