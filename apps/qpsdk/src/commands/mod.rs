//! Subcommand implementations

pub mod build;
pub mod setup;

use crate::error::CliError;
use qpsdk_builder::detect_python_version;
use qpsdk_layout::PythonVersion;

/// Python version from the CLI flag, or from the interpreter when omitted.
pub(crate) async fn python_version(flag: Option<&str>) -> Result<PythonVersion, CliError> {
    match flag {
        Some(value) => Ok(value.parse()?),
        None => Ok(detect_python_version().await?),
    }
}
