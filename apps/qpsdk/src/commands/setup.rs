//! `qpsdk setup`: relocate an installed SDK and activate its environment

use tracing::info;

use crate::cli::SetupArgs;
use crate::error::CliError;
use qpsdk_layout::{InstallLayout, SdkEnvironment};
use qpsdk_relocate::relocate_sdk;

pub async fn run(args: SetupArgs) -> Result<i32, CliError> {
    if SdkEnvironment::is_already_active() {
        return Err(CliError::Setup(
            "SDK setup already done in this environment".to_string(),
        ));
    }

    let root = match args.install_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let python = super::python_version(args.python.as_deref()).await?;
    let layout = InstallLayout::resolve(&root, python)?;
    layout.verify();

    if !args.no_relocate {
        let report = relocate_sdk(&layout)?;
        info!(
            changed = report.changed_files.len(),
            warnings = report.warnings.len(),
            "relocation done"
        );
    }

    let env = SdkEnvironment::for_layout(&layout);

    if args.command.is_empty() {
        // No command: emit the environment for the caller's shell.
        for line in env.export_lines() {
            println!("{line}");
        }
        return Ok(0);
    }

    let status = tokio::process::Command::new(&args.command[0])
        .args(&args.command[1..])
        .envs(env.vars().iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .status()
        .await?;

    Ok(status.code().unwrap_or(1))
}
