//! External command execution
//!
//! Commands never inherit an ambient working directory or environment
//! mutation: both are passed explicitly per invocation. Output streams
//! straight through to the user; the command line itself is logged with a
//! `+ ` prefix before it runs.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use qpsdk_errors::{BuildError, Error, Result};
use qpsdk_layout::{PythonVersion, SdkEnvironment};

/// Profile platform key for the running OS.
#[must_use]
pub fn platform_key() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "windows",
        _ => "linux",
    }
}

/// Name of the Python interpreter used to drive configure scripts.
#[must_use]
pub fn python_interpreter() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}

/// Run `program` with `args` in `cwd` under the SDK environment.
///
/// # Errors
///
/// Returns [`BuildError::MissingTool`] when the program cannot be found and
/// [`BuildError::CommandFailed`] on a non-zero exit.
pub async fn run_logged(
    program: &str,
    args: &[&str],
    cwd: &Path,
    env: &SdkEnvironment,
) -> Result<()> {
    let rendered = render(program, args);
    info!("+ {rendered}");

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .envs(env.vars().iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .status()
        .await
        .map_err(|e| spawn_error(program, &rendered, &e))?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Build(BuildError::CommandFailed {
            command: rendered,
            status: status.to_string(),
        }))
    }
}

/// Run the platform's make: `nmake` on Windows, parallel GNU make elsewhere.
///
/// # Errors
///
/// Same failure modes as [`run_logged`].
pub async fn make(args: &[&str], cwd: &Path, env: &SdkEnvironment) -> Result<()> {
    if cfg!(target_os = "windows") {
        run_logged("nmake", args, cwd, env).await
    } else {
        let jobs = format!("-j{}", num_cpus::get() + 1);
        let mut all = vec![jobs.as_str()];
        all.extend_from_slice(args);
        run_logged("make", &all, cwd, env).await
    }
}

/// Check up front that the tools every planned step shells out to exist.
///
/// # Errors
///
/// Returns [`BuildError::MissingTool`] for the first absent tool.
pub fn preflight(tools: &[&str]) -> Result<()> {
    for tool in tools {
        which::which(tool).map_err(|_| {
            Error::Build(BuildError::MissingTool {
                name: (*tool).to_string(),
            })
        })?;
    }
    Ok(())
}

/// Ask the Python interpreter for its version, for the versioned bindings
/// directory name.
///
/// # Errors
///
/// Returns [`BuildError::MissingTool`] when no interpreter is found, or a
/// layout error when the reported version cannot be parsed.
pub async fn detect_python_version() -> Result<PythonVersion> {
    let interpreter = python_interpreter();
    let output = Command::new(interpreter)
        .arg("--version")
        .output()
        .await
        .map_err(|_| {
            Error::Build(BuildError::MissingTool {
                name: interpreter.to_string(),
            })
        })?;

    // "Python 3.9.18" (historically on stderr, stdout since 3.4)
    let text = if output.stdout.is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        String::from_utf8_lossy(&output.stdout).into_owned()
    };

    text.split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .parse::<PythonVersion>()
}

fn render(program: &str, args: &[&str]) -> String {
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

fn spawn_error(program: &str, rendered: &str, err: &std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::Build(BuildError::MissingTool {
            name: program.to_string(),
        })
    } else {
        Error::Build(BuildError::CommandFailed {
            command: rendered.to_string(),
            status: err.to_string(),
        })
    }
}
