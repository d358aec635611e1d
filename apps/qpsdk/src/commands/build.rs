//! `qpsdk build`: sequence the package builds into one install root

use std::path::PathBuf;

use tracing::info;

use crate::cli::BuildArgs;
use crate::error::CliError;
use qpsdk_builder::{
    archive_sdk, install_orchestrator, platform_key, prepare_install_root, preflight,
    python_interpreter, run_plan, BuildPlan, BuildProfile, Package, SourceSet,
};
use qpsdk_layout::{InstallLayout, SdkEnvironment};

pub async fn run(args: BuildArgs) -> Result<i32, CliError> {
    let profile = BuildProfile::load(&args.profile).await?;

    let selected = args
        .packages
        .iter()
        .map(|s| s.parse::<Package>())
        .collect::<Result<Vec<_>, _>>()?;

    let sources = SourceSet {
        icu: args.with_icu_sources,
        qt: args.with_qt_sources,
        sip: args.with_sip_sources,
        pyqt: args.with_pyqt_sources,
    }
    .discover_missing(&args.sources);

    // Ubuntu ships a usable ICU; macOS and Windows do not.
    let build_icu = matches!(std::env::consts::OS, "macos" | "windows");
    let plan = BuildPlan::assemble(&sources, build_icu)?;

    let python = super::python_version(args.python.as_deref()).await?;

    let install_root = match args.install_root {
        Some(root) => root,
        None => default_install_root(&plan, args.debug)?,
    };

    let layout = InstallLayout::resolve(&install_root, python)?;
    prepare_install_root(&layout).await?;
    let env = SdkEnvironment::for_layout(&layout);

    let plan = plan.filter(&selected);
    preflight(&required_tools(&plan))?;

    run_plan(&plan, &layout, &profile, &env, args.debug).await?;

    // Ship the orchestrator inside the SDK; an unpacked tree runs its own
    // `setup` with no other tooling.
    install_orchestrator(&layout).await?;

    if args.no_archive {
        info!(root = %layout.root().display(), "SDK build finished");
    } else {
        let basename = layout
            .root()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sdk".to_string());
        let output = PathBuf::from(format!("{basename}.tar.gz"));
        let archive = archive_sdk(layout.root(), &output).await?;
        info!(archive = %archive.display(), "SDK build finished");
    }

    Ok(0)
}

/// `_out/qt-<v>-sip-<v>-pyqt-<v>-<platform>-<arch>-<build type>`
fn default_install_root(plan: &BuildPlan, debug: bool) -> Result<PathBuf, CliError> {
    let version = |package: Package| {
        plan.version_of(package).ok_or_else(|| {
            CliError::InvalidArguments(format!(
                "cannot derive a default install root without a {package} source; pass --install-root"
            ))
        })
    };

    let name = format!(
        "qt-{}-sip-{}-pyqt-{}-{}-{}-{}",
        version(Package::Qt)?,
        version(Package::Sip)?,
        version(Package::PyQt)?,
        platform_key(),
        std::env::consts::ARCH,
        if debug { "debug" } else { "release" },
    );

    Ok(PathBuf::from("_out").join(name))
}

/// Tools the planned steps shell out to, checked before any build starts.
fn required_tools(plan: &BuildPlan) -> Vec<&'static str> {
    let mut tools = vec![if cfg!(target_os = "windows") {
        "nmake"
    } else {
        "make"
    }];

    for step in plan.steps() {
        match step.package {
            Package::Icu => tools.push("bash"),
            Package::Sip | Package::PyQt => tools.push(python_interpreter()),
            Package::Qt => {}
        }
    }

    tools.dedup();
    tools
}
